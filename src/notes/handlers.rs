use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    categories::repo::{Category, DEFAULT_CATEGORIES},
    error::{ApiError, ApiResult},
    notes::{
        dto::{CreateNoteRequest, NoteResponse, NotesQuery, SummaryResponse, UpdateNoteRequest},
        repo::{Note, DEFAULT_CONTENT, DEFAULT_TITLE},
        summary,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/summary", get(get_summary))
        .route(
            "/notes/:id",
            get(get_note).patch(update_note).delete(delete_note),
        )
}

const MAX_TITLE_CHARS: usize = 255;

/// Category names a note may be moved to. Deliberately stricter than
/// creation, which falls back to the default instead of failing.
fn is_updatable_category(name: &str) -> bool {
    DEFAULT_CATEGORIES
        .iter()
        .any(|(default, _)| *default == name)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// The fallback category, re-created if it somehow went missing.
async fn default_category(state: &AppState, user_id: Uuid) -> ApiResult<Category> {
    let (name, color_hex) = DEFAULT_CATEGORIES[0];
    Ok(Category::get_or_create(&state.db, user_id, name, color_hex).await?)
}

#[instrument(skip(state))]
pub async fn list_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<NotesQuery>,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    // An empty ?category= is the same as no filter at all.
    let category = non_blank(query.category);
    let notes = Note::list(&state.db, user_id, category.as_deref()).await?;
    Ok(Json(notes.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Option<Json<CreateNoteRequest>>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();

    if let Some(title) = &body.title {
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(ApiError::validation("title", "Title too long"));
        }
    }

    let category = match non_blank(body.category_name) {
        // An unknown name never fails creation; the note lands in the default.
        Some(name) => match Category::find_by_name(&state.db, user_id, &name).await? {
            Some(category) => category,
            None => default_category(&state, user_id).await?,
        },
        None => default_category(&state, user_id).await?,
    };

    let title = non_blank(body.title).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let content = non_blank(body.content).unwrap_or_else(|| DEFAULT_CONTENT.to_string());

    let note = Note::create(&state.db, user_id, category.id, &title, &content).await?;
    info!(user_id = %user_id, note_id = note.id, category = %note.category_name, "note created");
    Ok((StatusCode::CREATED, Json(note.into())))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<SummaryResponse>> {
    let summary = summary::summarize(&state.db, user_id).await?;
    Ok(Json(summary))
}

#[instrument(skip(state))]
pub async fn get_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<NoteResponse>> {
    let note = Note::get(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(note.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    // A missing or foreign-owned note 404s before any field validation.
    Note::get(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let category_id = match payload.category_name.as_deref() {
        Some(name) => {
            if !is_updatable_category(name) {
                return Err(ApiError::validation("category_name", "Invalid category"));
            }
            let category = Category::find_by_name(&state.db, user_id, name)
                .await?
                .ok_or_else(|| ApiError::validation("category_name", "Invalid category"))?;
            Some(category.id)
        }
        None => None,
    };

    if let Some(title) = &payload.title {
        if title.is_empty() {
            return Err(ApiError::validation("title", "Title may not be blank"));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(ApiError::validation("title", "Title too long"));
        }
    }

    let note = Note::update(
        &state.db,
        user_id,
        id,
        payload.title.as_deref(),
        payload.content.as_deref(),
        category_id,
    )
    .await?
    .ok_or(ApiError::NotFound)?;

    info!(user_id = %user_id, note_id = note.id, "note updated");
    Ok(Json(note.into()))
}

#[instrument(skip(state))]
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !Note::delete(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound);
    }
    info!(user_id = %user_id, note_id = id, "note deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_allow_list_is_the_seeded_set() {
        assert!(is_updatable_category("Random Thoughts"));
        assert!(is_updatable_category("School"));
        assert!(is_updatable_category("Personal"));
        assert!(!is_updatable_category("NotARealCategory"));
        assert!(!is_updatable_category("school"));
    }

    #[test]
    fn blank_fields_fall_back() {
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("kept".into())), Some("kept".into()));
    }
}
