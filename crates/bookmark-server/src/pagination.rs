//! Lenient parsing of listing query parameters.
//!
//! A malformed or out-of-range value never fails the request. It falls back to
//! its own default and a warning is logged.

use bookmark_store::ListQuery;
use serde::Deserialize;

/// Page size used when `per_page` is absent or invalid.
pub const DEFAULT_PER_PAGE: i64 = i32::MAX as i64;

/// Page used when `page` is absent or invalid.
pub const DEFAULT_PAGE: i64 = 1;

/// Raw query string of `GET /bookmarks`.
///
/// Fields are kept as strings so that bad input can be defaulted instead of
/// rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub per_page: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// Sanitized listing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub per_page: i64,
    pub page: i64,
    pub search: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: DEFAULT_PAGE,
            search: String::new(),
        }
    }
}

impl ListOptions {
    pub fn from_params(params: &ListParams) -> Self {
        Self {
            per_page: positive_or_default("per_page", params.per_page.as_deref(), DEFAULT_PER_PAGE),
            page: positive_or_default("page", params.page.as_deref(), DEFAULT_PAGE),
            search: params.search.clone().unwrap_or_default(),
        }
    }

    /// Number of bookmarks to skip: `(page - 1) * per_page`, saturating.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn to_query(&self) -> ListQuery {
        ListQuery::new(self.per_page, self.offset(), self.search.clone())
    }
}

fn positive_or_default(name: &str, raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return default;
    };

    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => value,
        Ok(value) => {
            tracing::warn!(param = name, value, default, "Out-of-range pagination value");
            default
        }
        Err(e) => {
            tracing::warn!(param = name, raw, error = %e, default, "Malformed pagination value");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(per_page: Option<&str>, page: Option<&str>, search: Option<&str>) -> ListParams {
        ListParams {
            per_page: per_page.map(String::from),
            page: page.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn test_defaults() {
        let opts = ListOptions::from_params(&ListParams::default());
        assert_eq!(opts, ListOptions::default());
        assert_eq!(opts.offset(), 0);
        assert_eq!(opts.to_query(), ListQuery::new(i32::MAX as i64, 0, ""));
    }

    #[test]
    fn test_valid_values() {
        let opts = ListOptions::from_params(&params(Some("10"), Some("3"), Some("rust")));
        assert_eq!(opts.per_page, 10);
        assert_eq!(opts.page, 3);
        assert_eq!(opts.offset(), 20);
        assert_eq!(opts.to_query(), ListQuery::new(10, 20, "rust"));
    }

    #[test]
    fn test_each_bad_value_falls_back_independently() {
        let opts = ListOptions::from_params(&params(Some("abc"), Some("2"), None));
        assert_eq!(opts.per_page, DEFAULT_PER_PAGE);
        assert_eq!(opts.page, 2);

        let opts = ListOptions::from_params(&params(Some("5"), Some("-1"), None));
        assert_eq!(opts.per_page, 5);
        assert_eq!(opts.page, DEFAULT_PAGE);

        let opts = ListOptions::from_params(&params(Some("0"), Some("1.5"), Some("")));
        assert_eq!(opts, ListOptions::default());
    }

    #[test]
    fn test_offset_saturates() {
        let opts = ListOptions {
            per_page: DEFAULT_PER_PAGE,
            page: i64::MAX,
            search: String::new(),
        };
        assert_eq!(opts.offset(), i64::MAX);
    }
}
