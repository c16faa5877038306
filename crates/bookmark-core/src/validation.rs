//! Input validation for bookmark titles and URLs.

use thiserror::Error;
use url::Url;

/// Reasons a create or edit request is rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("url must not be empty")]
    EmptyUrl,

    /// The URL did not parse as an absolute URL with a host.
    #[error("url is not well-formed: {0}")]
    InvalidUrl(String),
}

/// Rejects blank titles.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Requires an absolute URL with a host, e.g. `https://example.com/page`.
pub fn validate_url(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let parsed = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;
    if !parsed.has_host() {
        return Err(ValidationError::InvalidUrl(format!("{} has no host", raw)));
    }

    Ok(())
}
