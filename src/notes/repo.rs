use anyhow::Context;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Title a freshly created note starts with.
pub const DEFAULT_TITLE: &str = "Note Title";
/// Content a freshly created note starts with.
pub const DEFAULT_CONTENT: &str = "Pour your heart out...";

/// A note still carrying both defaults has never been written in. Such
/// notes stay listable but are ignored by counts and existence checks.
pub fn is_placeholder(title: &str, content: &str) -> bool {
    title == DEFAULT_TITLE && content == DEFAULT_CONTENT
}

/// Note row joined with its category.
#[derive(Debug, Clone, FromRow)]
pub struct Note {
    pub id: i64,
    pub user_id: Uuid,
    pub category_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub category_name: String,
    pub category_color_hex: String,
}

const SELECT_NOTE: &str = r#"
SELECT n.id, n.user_id, n.category_id, n.title, n.content,
       n.created_at, n.updated_at,
       c.name AS category_name, c.color_hex AS category_color_hex
FROM notes n
JOIN categories c ON c.id = n.category_id
"#;

impl Note {
    /// Fetch one note by id, scoped to its owner. This is the single
    /// ownership check every detail operation goes through; a foreign id
    /// looks exactly like a missing one.
    pub async fn get(db: &PgPool, user_id: Uuid, note_id: i64) -> anyhow::Result<Option<Note>> {
        let query = format!("{SELECT_NOTE} WHERE n.id = $1 AND n.user_id = $2");
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(note_id)
            .bind(user_id)
            .fetch_optional(db)
            .await?;
        Ok(note)
    }

    /// List the user's notes, most recently touched first, optionally
    /// narrowed to one category by name.
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        category_name: Option<&str>,
    ) -> anyhow::Result<Vec<Note>> {
        const ORDER: &str = "ORDER BY n.updated_at DESC, n.created_at DESC";
        let rows = match category_name {
            Some(name) => {
                let query = format!("{SELECT_NOTE} WHERE n.user_id = $1 AND c.name = $2 {ORDER}");
                sqlx::query_as::<_, Note>(&query)
                    .bind(user_id)
                    .bind(name)
                    .fetch_all(db)
                    .await?
            }
            None => {
                let query = format!("{SELECT_NOTE} WHERE n.user_id = $1 {ORDER}");
                sqlx::query_as::<_, Note>(&query)
                    .bind(user_id)
                    .fetch_all(db)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Insert a note and return it with its category joined in.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        category_id: i64,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Note> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO notes (user_id, category_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .bind(title)
        .bind(content)
        .fetch_one(db)
        .await?;

        Self::get(db, user_id, id)
            .await?
            .context("note missing right after insert")
    }

    /// Apply a partial update in one statement; `None` fields keep their
    /// stored value. `updated_at` refreshes on every successful call, even
    /// when nothing else changed.
    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        note_id: i64,
        title: Option<&str>,
        content: Option<&str>,
        category_id: Option<i64>,
    ) -> anyhow::Result<Option<Note>> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE notes SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                category_id = COALESCE($5, category_id),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id
            "#,
        )
        .bind(note_id)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(category_id)
        .fetch_optional(db)
        .await?;

        match updated {
            Some(id) => Self::get(db, user_id, id).await,
            None => Ok(None),
        }
    }

    /// Hard delete. Returns whether a row owned by the user was removed.
    pub async fn delete(db: &PgPool, user_id: Uuid, note_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(note_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// True if the user has at least one non-placeholder note.
    pub async fn any_visible(db: &PgPool, user_id: Uuid) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM notes
                WHERE user_id = $1 AND NOT (title = $2 AND content = $3)
            )
            "#,
        )
        .bind(user_id)
        .bind(DEFAULT_TITLE)
        .bind(DEFAULT_CONTENT)
        .fetch_one(db)
        .await?;
        Ok(exists)
    }

    /// Remove every placeholder note, across all users. Maintenance only;
    /// the API never calls this.
    pub async fn delete_placeholders(db: &PgPool) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM notes WHERE title = $1 AND content = $2")
            .bind(DEFAULT_TITLE)
            .bind(DEFAULT_CONTENT)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
