//! In-memory store with the same contract as the PostgreSQL `Store`.
//!
//! Uniqueness and not-found checks happen under a single write lock, which
//! gives the same atomicity the database constraints provide.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bookmark_core::{Bookmark, BookmarkId, Existence};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::capability::{
    BookmarkChecker, BookmarkCreator, BookmarkEditor, BookmarkPager, BookmarkRemover,
    BookmarkStore, Pinger,
};
use crate::error::{StoreError, StoreResult};
use crate::models::BookmarkPage;
use crate::query::ListQuery;

#[derive(Debug, Default)]
struct Inner {
    next_id: BookmarkId,
    bookmarks: BTreeMap<BookmarkId, Bookmark>,
}

/// Bookmark store held entirely in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                bookmarks: BTreeMap::new(),
            }),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the backend going away (`false`) or coming back (`true`).
    ///
    /// While unavailable every operation fails with `Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored bookmarks.
    pub async fn len(&self) -> usize {
        self.inner.read().await.bookmarks.len()
    }

    /// Whether the store holds no bookmarks.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        }
    }
}

#[async_trait]
impl BookmarkPager for MemoryStore {
    async fn get_bookmarks(&self, query: &ListQuery) -> StoreResult<BookmarkPage> {
        self.check_available()?;
        let inner = self.inner.read().await;

        let mut matching: Vec<&Bookmark> = inner
            .bookmarks
            .values()
            .filter(|b| query.matches(&b.title, &b.url))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as i64;
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        let bookmarks = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(BookmarkPage { bookmarks, total })
    }
}

#[async_trait]
impl BookmarkCreator for MemoryStore {
    async fn create_bookmark(&self, title: &str, url: &str) -> StoreResult<Bookmark> {
        self.check_available()?;
        let mut inner = self.inner.write().await;

        if inner.bookmarks.values().any(|b| b.url == url) {
            return Err(StoreError::Conflict);
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let now = Utc::now();
        let bookmark = Bookmark {
            id,
            title: title.to_string(),
            url: url.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.bookmarks.insert(id, bookmark.clone());

        Ok(bookmark)
    }
}

#[async_trait]
impl BookmarkEditor for MemoryStore {
    async fn edit_bookmark(
        &self,
        id: BookmarkId,
        title: &str,
        url: &str,
    ) -> StoreResult<Bookmark> {
        self.check_available()?;
        let mut inner = self.inner.write().await;

        if !inner.bookmarks.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        if inner.bookmarks.values().any(|b| b.url == url && b.id != id) {
            return Err(StoreError::Conflict);
        }

        let bookmark = inner
            .bookmarks
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        bookmark.title = title.to_string();
        bookmark.url = url.to_string();
        bookmark.updated_at = Utc::now().max(bookmark.created_at);

        Ok(bookmark.clone())
    }
}

#[async_trait]
impl BookmarkRemover for MemoryStore {
    async fn delete_bookmark(&self, id: BookmarkId) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.write().await;

        match inner.bookmarks.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }
}

#[async_trait]
impl BookmarkChecker for MemoryStore {
    async fn bookmark_exists(&self, url: &str) -> StoreResult<Existence> {
        self.check_available()?;
        let inner = self.inner.read().await;

        Ok(inner
            .bookmarks
            .values()
            .find(|b| b.url == url)
            .map(|b| Existence::found(b.id))
            .unwrap_or_else(Existence::missing))
    }
}

#[async_trait]
impl Pinger for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn close(&self) {
        self.set_available(false);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    async fn seeded(titles: &[(&str, &str)]) -> MemoryStore {
        let store = MemoryStore::new();
        for (title, url) in titles {
            store.create_bookmark(title, url).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_timestamps() {
        let store = MemoryStore::new();
        let created = store
            .create_bookmark("Example", "https://example.com")
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.title, "Example");
        assert_eq!(created.created_at, created.updated_at);

        let second = store
            .create_bookmark("Other", "https://other.example")
            .await
            .unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_url_conflicts() {
        let store = MemoryStore::new();
        store
            .create_bookmark("Example", "https://example.com")
            .await
            .unwrap();

        let err = store
            .create_bookmark("Again", "https://example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_yield_one_success() {
        let store = Arc::new(MemoryStore::new());

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .create_bookmark(&format!("Attempt {}", i), "https://race.example")
                    .await
            }));
        }

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(StoreError::Conflict) => conflicts += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn test_edit_refreshes_updated_at() {
        let store = seeded(&[("Example", "https://example.com")]).await;

        let edited = store
            .edit_bookmark(1, "Renamed", "https://example.org")
            .await
            .unwrap();
        assert_eq!(edited.id, 1);
        assert_eq!(edited.title, "Renamed");
        assert_eq!(edited.url, "https://example.org");
        assert!(edited.updated_at >= edited.created_at);

        let existence = store.bookmark_exists("https://example.com").await.unwrap();
        assert!(!existence.found);
    }

    #[tokio::test]
    async fn test_edit_missing_and_conflicting() {
        let store = seeded(&[("A", "https://a.example"), ("B", "https://b.example")]).await;

        let err = store
            .edit_bookmark(99, "X", "https://x.example")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(99)));

        let err = store
            .edit_bookmark(1, "A", "https://b.example")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict));

        // Keeping its own url is not a conflict.
        store
            .edit_bookmark(1, "A2", "https://a.example")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_then_exists() {
        let store = seeded(&[("Example", "https://example.com")]).await;

        let err = store.delete_bookmark(42).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));

        assert_eq!(
            store.bookmark_exists("https://example.com").await.unwrap(),
            Existence::found(1)
        );
        store.delete_bookmark(1).await.unwrap();
        assert_eq!(
            store.bookmark_exists("https://example.com").await.unwrap(),
            Existence::missing()
        );

        let err = store.delete_bookmark(1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(1)));
    }

    #[tokio::test]
    async fn test_search_total_is_independent_of_window() {
        let store = seeded(&[
            ("Foo fighters", "https://band.example"),
            ("Bar", "https://foo.example"),
            ("Baz", "https://baz.example"),
            ("FOOD", "https://eat.example"),
        ])
        .await;

        let page = store
            .get_bookmarks(&ListQuery::new(1, 0, "foo"))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.bookmarks.len(), 1);

        let beyond = store
            .get_bookmarks(&ListQuery::new(10, 50, "foo"))
            .await
            .unwrap();
        assert_eq!(beyond.total, 3);
        assert!(beyond.bookmarks.is_empty());

        let all = store
            .get_bookmarks(&ListQuery::new(10, 0, "foo"))
            .await
            .unwrap();
        for b in &all.bookmarks {
            let hay = format!("{} {}", b.title, b.url).to_lowercase();
            assert!(hay.contains("foo"));
        }
    }

    #[tokio::test]
    async fn test_pages_cover_everything_once_newest_first() {
        let store = MemoryStore::new();
        for i in 0..23 {
            store
                .create_bookmark(&format!("Item {}", i), &format!("https://item{}.example", i))
                .await
                .unwrap();
        }

        let full = store.get_bookmarks(&ListQuery::unbounded()).await.unwrap();
        assert_eq!(full.total, 23);

        let per_page = 5;
        let mut collected = Vec::new();
        let mut offset = 0;
        while offset < full.total {
            let page = store
                .get_bookmarks(&ListQuery::new(per_page, offset, ""))
                .await
                .unwrap();
            assert_eq!(page.total, full.total);
            collected.extend(page.bookmarks);
            offset += per_page;
        }

        assert_eq!(collected, full.bookmarks);
        let ids: HashSet<_> = collected.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 23);
        for pair in collected.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        assert_eq!(collected[0].id, 23);
    }

    #[tokio::test]
    async fn test_unavailable_fails_everything() {
        let store = seeded(&[("Example", "https://example.com")]).await;
        store.set_available(false);

        assert!(store.ping().await.unwrap_err().is_unavailable());
        assert!(
            store
                .get_bookmarks(&ListQuery::unbounded())
                .await
                .unwrap_err()
                .is_unavailable()
        );
        assert!(
            store
                .bookmark_exists("https://example.com")
                .await
                .unwrap_err()
                .is_unavailable()
        );

        store.set_available(true);
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let store = MemoryStore::new();
        store.close().await;
        store.close().await;
        assert!(store.ping().await.is_err());
    }
}
