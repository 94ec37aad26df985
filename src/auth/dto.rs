use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo::User;
use crate::categories::repo::DEFAULT_CATEGORY;

/// Where the client should land after authenticating. Static for now, but
/// kept next to the rest of the UI state so per-user routing can slot in.
pub const LANDING_ROUTE: &str = "/notes";

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Access/refresh pair in the shape clients store it.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// What the frontend needs to route the user after auth: whether any real
/// writing exists yet, and where to send them.
#[derive(Debug, Serialize)]
pub struct UiState {
    pub has_notes: bool,
    pub default_category: &'static str,
    pub landing_route: &'static str,
}

impl UiState {
    pub fn new(has_notes: bool) -> Self {
        Self {
            has_notes,
            default_category: DEFAULT_CATEGORY,
            landing_route: LANDING_ROUTE,
        }
    }
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: PublicUser,
    pub tokens: TokenPair,
    pub ui: UiState,
}

/// Response for a session probe by an already-authenticated client.
#[derive(Debug, Serialize)]
pub struct BootstrapResponse {
    pub user: PublicUser,
    pub ui: UiState,
}
