//! Core data types for the bookmark catalog.
//!
//! A bookmark is the only entity. Its `id` and `created_at` are assigned by
//! the store and never change; `updated_at` is refreshed on every edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Store-assigned bookmark identifier.
pub type BookmarkId = i64;

/// A URL bookmark. URLs are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Title and URL supplied by a client when creating or editing a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkInput {
    pub title: String,
    pub url: String,
}

impl BookmarkInput {
    /// Creates a new input from a title and URL.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Checks that the title is non-empty and the URL is well-formed.
    ///
    /// The input is not rewritten; what passes validation is stored verbatim.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_title(&self.title)?;
        validation::validate_url(&self.url)?;
        Ok(())
    }
}

/// Result of probing the catalog for a URL.
///
/// A miss is a normal outcome: `found == false` and `id == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Existence {
    pub id: BookmarkId,
    pub found: bool,
}

impl Existence {
    /// A hit for the given bookmark id.
    #[must_use]
    pub const fn found(id: BookmarkId) -> Self {
        Self { id, found: true }
    }

    /// A miss.
    #[must_use]
    pub const fn missing() -> Self {
        Self { id: 0, found: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bookmark_json_shape() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let bookmark = Bookmark {
            id: 1,
            title: "Example".to_string(),
            url: "https://example.com".to_string(),
            created_at: ts,
            updated_at: ts,
        };

        let json = serde_json::to_value(&bookmark).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Example");
        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["created_at"], "2025-03-01T12:00:00Z");
        assert_eq!(json["updated_at"], "2025-03-01T12:00:00Z");
    }

    #[test]
    fn test_existence_missing_is_zero_id() {
        let miss = Existence::missing();
        assert_eq!(miss.id, 0);
        assert!(!miss.found);

        let json = serde_json::to_value(Existence::found(7)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "found": true }));
    }

    #[test]
    fn test_input_validate() {
        assert!(BookmarkInput::new("Rust", "https://www.rust-lang.org").validate().is_ok());
        assert_eq!(
            BookmarkInput::new("", "https://www.rust-lang.org").validate(),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            BookmarkInput::new("Rust", "").validate(),
            Err(ValidationError::EmptyUrl)
        );
    }
}
