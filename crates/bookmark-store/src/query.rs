//! List query model: pagination window plus substring search.

/// Parameters for a bookmark listing.
///
/// The store assumes sanitized input: `limit > 0` and `offset >= 0`. Callers
/// (the HTTP handlers) are responsible for defaulting bad values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Maximum number of bookmarks to return.
    pub limit: i64,
    /// Number of matching bookmarks to skip.
    pub offset: i64,
    /// Case-insensitive substring matched against title and url. Empty means no filter.
    pub search: String,
}

impl ListQuery {
    /// Create a query for the window `[offset, offset + limit)`.
    pub fn new(limit: i64, offset: i64, search: impl Into<String>) -> Self {
        Self {
            limit,
            offset,
            search: search.into(),
        }
    }

    /// A query covering the entire collection.
    pub fn unbounded() -> Self {
        Self::new(i64::MAX, 0, "")
    }

    /// Whether a search filter is applied.
    pub fn has_search(&self) -> bool {
        !self.search.is_empty()
    }

    /// The `ILIKE` pattern for the search text, with wildcards escaped so the
    /// search is matched literally.
    pub fn like_pattern(&self) -> Option<String> {
        if !self.has_search() {
            return None;
        }
        Some(format!("%{}%", escape_like_wildcards(&self.search)))
    }

    /// In-process equivalent of the `ILIKE` filter.
    pub fn matches(&self, title: &str, url: &str) -> bool {
        if !self.has_search() {
            return true;
        }
        let needle = self.search.to_lowercase();
        title.to_lowercase().contains(&needle) || url.to_lowercase().contains(&needle)
    }
}

/// Escape `%`, `_` and `\` for use inside a `LIKE`/`ILIKE` pattern.
pub fn escape_like_wildcards(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
