use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error type returned by HTTP handlers.
///
/// Implements [`IntoResponse`] so handlers bubble failures with `?` and the
/// client always sees a stable JSON body for each class of error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, malformed, expired, or wrong-kind bearer token.
    #[error("authentication required")]
    AuthenticationRequired,

    /// Login with an unknown email or a wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Resource absent or owned by someone else; the two are never
    /// distinguished in the response.
    #[error("not found")]
    NotFound,

    /// Field-scoped request validation failure.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// Anything unexpected from the storage layer or below.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn validation(field: &'static str, message: &'static str) -> Self {
        Self::Validation { field, message }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": "Authentication required" }),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": "Invalid credentials" }),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "detail": "Not found." })),
            ApiError::Validation { field, message } => {
                (StatusCode::BAD_REQUEST, json!({ field: [message] }))
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_body_is_field_scoped() {
        let response = ApiError::validation("email", "Invalid email").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_of(response).await;
        assert_eq!(json["email"][0], "Invalid email");
    }

    #[tokio::test]
    async fn not_found_matches_wire_detail() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_of(response).await;
        assert_eq!(json["detail"], "Not found.");
    }

    #[tokio::test]
    async fn internal_hides_the_cause() {
        let response = ApiError::from(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_of(response).await;
        assert_eq!(json["detail"], "Internal server error");
    }
}
