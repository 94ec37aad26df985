use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::jwt::AuthUser,
    categories::{dto::CategoryResponse, repo::Category},
    error::ApiResult,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let categories = Category::list(&state.db, user_id).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
