//! bookmark-store: Storage layer for the bookmark catalog
//!
//! This crate provides:
//! - PostgreSQL storage for bookmarks (`Store`)
//! - An in-memory store with identical semantics (`MemoryStore`)
//! - One capability trait per operation, so callers depend only on what they use
//! - Pagination and case-insensitive substring search
//! - Schema bootstrap
//!
//! # Consistency
//!
//! URL uniqueness and not-found detection come from the database itself: a
//! unique constraint on `url`, and the row count reported by the mutating
//! statement. There is no read-then-write step that could race with a
//! concurrent request.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmark_store::{BookmarkCreator, BookmarkPager, ListQuery, Store, StoreConfig};
//!
//! let store = Store::connect(StoreConfig::from_env()?).await?;
//!
//! let created = store.create_bookmark("Rust", "https://www.rust-lang.org").await?;
//! let page = store.get_bookmarks(&ListQuery::new(20, 0, "rust")).await?;
//! ```

pub mod capability;
pub mod error;
pub mod memory;
pub mod models;
pub mod query;
pub mod schema;
pub mod store;

pub use capability::{
    BookmarkChecker, BookmarkCreator, BookmarkEditor, BookmarkPager, BookmarkRemover,
    BookmarkStore, Pinger,
};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::{BookmarkPage, BookmarkRow};
pub use query::ListQuery;
pub use store::{Store, StoreConfig};

// Re-export bookmark-core for downstream crates
pub use bookmark_core;
