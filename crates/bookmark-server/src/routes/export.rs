//! Bookmark export route.

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use bookmark_store::ListQuery;

use crate::error::{ApiError, ApiResult};
use crate::export::{EXPORT_FILENAME, render_netscape};
use crate::state::AppState;

const EXPORT_FAILED: &str = "failed to export bookmarks";

/// GET /bookmarks/export/html - Download every bookmark as a Netscape
/// bookmark file.
///
/// The whole collection is read in one call. Any bookmark that cannot be
/// rendered fails the export with a 500; no partial document is sent.
async fn export_html(State(state): State<AppState>) -> ApiResult<Response> {
    let page = state
        .pager()
        .get_bookmarks(&ListQuery::unbounded())
        .await
        .map_err(|e| ApiError::from_store(e, EXPORT_FAILED))?;

    let document = render_netscape(&page.bookmarks).map_err(|e| {
        tracing::error!(error = %e, "Export rendering failed");
        ApiError::Internal(EXPORT_FAILED.to_string())
    })?;

    tracing::info!(count = page.bookmarks.len(), "Exported bookmarks");

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        document,
    )
        .into_response())
}

/// Build export routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/bookmarks/export/html", get(export_html))
}
