use anyhow::Context;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

/// Categories every account starts with, in seed order.
pub const DEFAULT_CATEGORIES: [(&str, &str); 3] = [
    ("Random Thoughts", "#EF9C66"),
    ("School", "#FCDC94"),
    ("Personal", "#78ABA8"),
];

/// Category notes land in when none is named.
pub const DEFAULT_CATEGORY: &str = DEFAULT_CATEGORIES[0].0;

/// Per-user named bucket for notes. `(user_id, name)` is unique.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub color_hex: String,
    pub created_at: OffsetDateTime,
}

impl Category {
    /// All categories owned by the user, in creation (id) order.
    pub async fn list(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, user_id, name, color_hex, created_at
            FROM categories
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Owner-scoped lookup by exact name.
    pub async fn find_by_name(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
    ) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, user_id, name, color_hex, created_at
            FROM categories
            WHERE user_id = $1 AND name = $2
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Fetch the named category, inserting it if absent.
    ///
    /// The unique index on `(user_id, name)` is the authority: when a
    /// concurrent request wins the insert, ours becomes a no-op and the
    /// follow-up read returns the winner. Existing rows keep their color.
    pub async fn get_or_create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        color_hex: &str,
    ) -> anyhow::Result<Category> {
        if let Some(existing) = Self::find_by_name(db, user_id, name).await? {
            return Ok(existing);
        }

        let inserted = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (user_id, name, color_hex)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, name) DO NOTHING
            RETURNING id, user_id, name, color_hex, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(color_hex)
        .fetch_optional(db)
        .await?;

        match inserted {
            Some(category) => Ok(category),
            None => Self::find_by_name(db, user_id, name)
                .await?
                .context("category vanished after insert conflict"),
        }
    }

    /// Seed the default categories for a fresh account, inside its
    /// registration transaction. Safe to run again for the same user.
    pub async fn seed_defaults_tx(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
    ) -> anyhow::Result<()> {
        for (name, color_hex) in DEFAULT_CATEGORIES {
            let existing = sqlx::query_as::<_, Category>(
                r#"
                SELECT id, user_id, name, color_hex, created_at
                FROM categories
                WHERE user_id = $1 AND name = $2
                "#,
            )
            .bind(user_id)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await?;
            if existing.is_some() {
                continue;
            }

            sqlx::query(
                r#"
                INSERT INTO categories (user_id, name, color_hex)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, name) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(name)
            .bind(color_hex)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_category_is_first_seeded() {
        assert_eq!(DEFAULT_CATEGORY, "Random Thoughts");
        assert_eq!(DEFAULT_CATEGORIES.len(), 3);
    }

    #[test]
    fn default_colors_are_hex_triplets() {
        for (_, color) in DEFAULT_CATEGORIES {
            assert!(color.starts_with('#'));
            assert_eq!(color.len(), 7);
        }
    }
}
