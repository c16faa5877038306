//! Capability traits, one per store operation.
//!
//! Handlers take only the capability they need (`Arc<dyn BookmarkCreator>`,
//! `Arc<dyn Pinger>`, ...), which keeps them decoupled from the concrete
//! backend and lets tests substitute [`MemoryStore`](crate::MemoryStore).
//!
//! All operations are cancellable: dropping the returned future aborts the
//! in-flight query.

use async_trait::async_trait;
use bookmark_core::{Bookmark, BookmarkId, Existence};

use crate::error::StoreResult;
use crate::models::BookmarkPage;
use crate::query::ListQuery;

/// Lists bookmarks newest first, with pagination and search.
#[async_trait]
pub trait BookmarkPager: Send + Sync {
    /// Returns the requested window and the total number of matches.
    async fn get_bookmarks(&self, query: &ListQuery) -> StoreResult<BookmarkPage>;
}

/// Inserts bookmarks.
#[async_trait]
pub trait BookmarkCreator: Send + Sync {
    /// Fails with `Conflict` if `url` is already taken.
    async fn create_bookmark(&self, title: &str, url: &str) -> StoreResult<Bookmark>;
}

/// Replaces the title and url of an existing bookmark.
#[async_trait]
pub trait BookmarkEditor: Send + Sync {
    /// Fails with `NotFound` for an unknown id and `Conflict` if `url` belongs
    /// to another bookmark. Refreshes `updated_at`.
    async fn edit_bookmark(&self, id: BookmarkId, title: &str, url: &str)
    -> StoreResult<Bookmark>;
}

/// Physically deletes bookmarks.
#[async_trait]
pub trait BookmarkRemover: Send + Sync {
    /// Fails with `NotFound` when nothing was deleted.
    async fn delete_bookmark(&self, id: BookmarkId) -> StoreResult<()>;
}

/// Looks up whether a URL is bookmarked.
#[async_trait]
pub trait BookmarkChecker: Send + Sync {
    /// A miss is `Ok(Existence::missing())`, never an error.
    async fn bookmark_exists(&self, url: &str) -> StoreResult<Existence>;
}

/// Liveness check against the backend.
#[async_trait]
pub trait Pinger: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}

/// Every capability plus connection teardown.
#[async_trait]
pub trait BookmarkStore:
    BookmarkPager + BookmarkCreator + BookmarkEditor + BookmarkRemover + BookmarkChecker + Pinger
{
    /// Releases held connections. Calling it more than once is a no-op.
    async fn close(&self);
}
