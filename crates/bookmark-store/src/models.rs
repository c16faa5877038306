//! Database models for the storage layer.
//!
//! `BookmarkRow` maps directly onto the `bookmarks` table and is converted
//! into the domain `Bookmark` from bookmark-core before leaving the store.

use bookmark_core::Bookmark;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row for the `bookmarks` table.
#[derive(Debug, Clone, FromRow)]
pub struct BookmarkRow {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookmarkRow> for Bookmark {
    fn from(row: BookmarkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Default)]
pub struct BookmarkPage {
    /// Bookmarks in the requested window, newest first.
    pub bookmarks: Vec<Bookmark>,
    /// Number of bookmarks matching the search before pagination.
    pub total: i64,
}
