//! Deletes notes still carrying both placeholder defaults.
//!
//! Run ad hoc or from cron with the usual environment; only DATABASE_URL
//! is required.

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use notenest::notes::repo::Note;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "notenest=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;

    let deleted = Note::delete_placeholders(&db).await?;
    tracing::info!(deleted, "removed empty notes");
    Ok(())
}
