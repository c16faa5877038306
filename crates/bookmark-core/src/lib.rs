//! bookmark-core: Core types for the bookmark catalog
//!
//! This crate provides:
//! - The `Bookmark` entity as exchanged over the wire
//! - `BookmarkInput`, the title/url pair accepted by create and edit
//! - Input validation shared by every entry point
//!
//! Persistence lives in `bookmark-store`; the HTTP surface lives in
//! `bookmark-server`.

pub mod types;
pub mod validation;

pub use types::{Bookmark, BookmarkId, BookmarkInput, Existence};
pub use validation::ValidationError;
