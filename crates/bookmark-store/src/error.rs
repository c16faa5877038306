//! Error types for the storage layer.

use bookmark_core::BookmarkId;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
///
/// Raw `sqlx` errors are classified on conversion, so callers can match on
/// `Conflict`, `NotFound` and `Unavailable` without inspecting driver codes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched the given id.
    #[error("bookmark not found")]
    NotFound(BookmarkId),

    /// The URL is already taken by another bookmark.
    #[error("bookmark for this url already exists")]
    Conflict,

    /// The database could not be reached.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Schema bootstrap failed.
    #[error("schema error: {0}")]
    SchemaError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Whether the failure came from the backend being unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => Self::Conflict,
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err.to_string()),
            other => Self::Database(other),
        }
    }
}
