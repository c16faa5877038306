//! API error types with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookmark_store::StoreError;
use serde::Serialize;

/// API error that can be returned from handlers.
///
/// The display string is exactly what the client sees in `{"error": ...}`,
/// so variants carry client-safe messages only.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("{0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Request timed out (408).
    #[error("request timed out")]
    RequestTimeout,

    /// Conflict (409).
    #[error("{0}")]
    Conflict(String),

    /// Rate limit exceeded (429).
    #[error("too many requests")]
    TooManyRequests,

    /// Internal server error (500).
    #[error("{0}")]
    Internal(String),

    /// Service unavailable (503).
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// Classify a store failure.
    ///
    /// `NotFound` and `Conflict` keep the store's message. Anything else is
    /// logged with full detail and replaced by `context`, so no database
    /// text reaches the client.
    pub fn from_store(err: StoreError, context: &str) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Conflict => Self::Conflict(err.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    unavailable = other.is_unavailable(),
                    "{}",
                    context
                );
                Self::Internal(context.to_string())
            }
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::from_store(err, "internal error")
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_classification() {
        let err = ApiError::from_store(StoreError::Conflict, "failed to create bookmark");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "bookmark for this url already exists");

        let err = ApiError::from_store(StoreError::NotFound(9), "failed to delete bookmark");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "bookmark not found");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ApiError::from_store(
            StoreError::Unavailable("connection refused to 10.0.0.5:5432".to_string()),
            "failed to get bookmarks",
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "failed to get bookmarks");
    }
}
