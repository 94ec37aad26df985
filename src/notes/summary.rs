use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::categories::repo::{Category, DEFAULT_CATEGORY};
use crate::notes::dto::{CategorySummary, SummaryResponse};
use crate::notes::repo::{is_placeholder, Note};

/// Dashboard aggregate over the user's notes and categories.
pub async fn summarize(db: &PgPool, user_id: Uuid) -> anyhow::Result<SummaryResponse> {
    let categories = Category::list(db, user_id).await?;
    let notes = Note::list(db, user_id, None).await?;
    Ok(build_summary(&categories, &notes))
}

/// Whether the user has written anything yet. Login and bootstrap consult
/// this; placeholder notes do not count.
pub async fn has_visible_notes(db: &PgPool, user_id: Uuid) -> anyhow::Result<bool> {
    Note::any_visible(db, user_id).await
}

/// Fold notes into per-category counts: drop placeholders, group the rest
/// by category, then walk the full category list so empty ones still
/// report a zero.
pub fn build_summary(categories: &[Category], notes: &[Note]) -> SummaryResponse {
    let mut counts: HashMap<i64, i64> = HashMap::new();
    for note in notes {
        if !is_placeholder(&note.title, &note.content) {
            *counts.entry(note.category_id).or_insert(0) += 1;
        }
    }

    let total_notes: i64 = counts.values().sum();
    let breakdown = categories
        .iter()
        .map(|category| CategorySummary {
            name: category.name.clone(),
            color_hex: category.color_hex.clone(),
            count: counts.get(&category.id).copied().unwrap_or(0),
        })
        .collect();

    SummaryResponse {
        has_notes: total_notes > 0,
        total_notes,
        default_category: DEFAULT_CATEGORY,
        categories: breakdown,
    }
}
