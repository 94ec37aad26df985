use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::categories::dto::CategoryResponse;
use crate::notes::repo::Note;

/// Note as clients see it, category embedded.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: i64,
    pub category: CategoryResponse,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            category: CategoryResponse {
                id: note.category_id,
                name: note.category_name,
                color_hex: note.category_color_hex,
            },
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Body for note creation. Everything is optional; missing or blank fields
/// fall back to the placeholder defaults, and an unknown category falls
/// back to the default one.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub category_name: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Partial update body. Absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub category_name: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Query string for note listings.
#[derive(Debug, Deserialize)]
pub struct NotesQuery {
    pub category: Option<String>,
}

/// Per-category slice of the dashboard summary.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub color_hex: String,
    pub count: i64,
}

/// Dashboard payload for `GET /notes/summary`.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub has_notes: bool,
    pub total_notes: i64,
    pub default_category: &'static str,
    pub categories: Vec<CategorySummary>,
}
