//! Schema definitions and bootstrap.
//!
//! The schema is embedded at compile time and written with
//! `IF NOT EXISTS` guards, so applying it on every start is safe.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded SQL for the bookmarks table (001_bookmarks.sql).
pub const BOOKMARKS_SCHEMA: &str = include_str!("../../../migrations/001_bookmarks.sql");

/// Apply the embedded schema.
///
/// # Errors
///
/// Returns `SchemaError` if the statements fail to execute.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Ensuring database schema...");

    sqlx::raw_sql(BOOKMARKS_SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| StoreError::SchemaError(format!("Bookmarks schema failed: {}", e)))?;

    tracing::info!("Schema ready");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `bookmarks` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'bookmarks'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}
