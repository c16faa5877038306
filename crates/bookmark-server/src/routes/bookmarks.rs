//! Bookmark CRUD, search and existence routes.
//!
//! - GET /bookmarks - List bookmarks newest first, paginated and searchable
//! - POST /bookmarks - Create a bookmark
//! - PATCH /bookmarks/{id} - Replace title and url
//! - DELETE /bookmarks/{id} - Delete a bookmark
//! - GET /bookmarks/exists?url= - Check whether a url is bookmarked

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use serde::Deserialize;

use bookmark_core::{Bookmark, BookmarkId, BookmarkInput, Existence};

use crate::error::{ApiError, ApiResult};
use crate::pagination::{ListOptions, ListParams};
use crate::routes::DataResponse;
use crate::state::AppState;

/// Response header carrying the number of matches before pagination.
pub const TOTAL_HEADER: HeaderName = HeaderName::from_static("x-total");

pub const MSG_DECODE_FAILED: &str = "failed to decode request body";
pub const MSG_INVALID_REQUEST: &str = "invalid request";
pub const MSG_DELETED: &str = "bookmark successfully deleted";

/// Query parameters for GET /bookmarks/exists.
#[derive(Debug, Default, Deserialize)]
pub struct ExistsParams {
    #[serde(default)]
    pub url: Option<String>,
}

// ============================================================================
// Extraction helpers
// ============================================================================

fn decode_body(payload: Result<Json<BookmarkInput>, JsonRejection>) -> ApiResult<BookmarkInput> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest(MSG_DECODE_FAILED.to_string())
    })?;

    if let Err(e) = input.validate() {
        tracing::debug!(error = %e, "Bookmark validation failed");
        return Err(ApiError::BadRequest(MSG_INVALID_REQUEST.to_string()));
    }

    Ok(input)
}

fn bookmark_id(path: Result<Path<BookmarkId>, PathRejection>) -> ApiResult<BookmarkId> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected bookmark id");
        ApiError::BadRequest(MSG_INVALID_REQUEST.to_string())
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /bookmarks - List bookmarks.
///
/// # Query Parameters
///
/// - `per_page`: page size, unlimited when absent
/// - `page`: 1-based page number
/// - `search`: case-insensitive substring of title or url
///
/// Malformed parameters fall back to their defaults. The `X-Total` header
/// carries the number of matches before pagination.
async fn list_bookmarks(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Response> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unparseable query string, using defaults");
            ListParams::default()
        }
    };
    let options = ListOptions::from_params(&params);

    let page = state
        .pager()
        .get_bookmarks(&options.to_query())
        .await
        .map_err(|e| ApiError::from_store(e, "failed to get bookmarks"))?;

    tracing::debug!(
        per_page = options.per_page,
        page = options.page,
        search = %options.search,
        returned = page.bookmarks.len(),
        total = page.total,
        "Listed bookmarks"
    );

    Ok((
        [(TOTAL_HEADER, HeaderValue::from(page.total))],
        Json(DataResponse::new(page.bookmarks)),
    )
        .into_response())
}

/// POST /bookmarks - Create a bookmark.
///
/// - 200 OK: `{"data": bookmark}`
/// - 400 Bad Request: undecodable body or invalid title/url
/// - 409 Conflict: url already bookmarked
async fn create_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<BookmarkInput>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Bookmark>>> {
    let input = decode_body(payload)?;

    let bookmark = state
        .creator()
        .create_bookmark(&input.title, &input.url)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to create bookmark"))?;

    tracing::info!(bookmark_id = bookmark.id, url = %bookmark.url, "Created bookmark");

    Ok(Json(DataResponse::new(bookmark)))
}

/// PATCH /bookmarks/{id} - Replace title and url.
///
/// The body is decoded and validated before the id is looked at.
async fn edit_bookmark(
    State(state): State<AppState>,
    path: Result<Path<BookmarkId>, PathRejection>,
    payload: Result<Json<BookmarkInput>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Bookmark>>> {
    let input = decode_body(payload)?;
    let id = bookmark_id(path)?;

    let bookmark = state
        .editor()
        .edit_bookmark(id, &input.title, &input.url)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to edit bookmark"))?;

    tracing::info!(bookmark_id = id, "Edited bookmark");

    Ok(Json(DataResponse::new(bookmark)))
}

/// DELETE /bookmarks/{id} - Delete a bookmark.
async fn delete_bookmark(
    State(state): State<AppState>,
    path: Result<Path<BookmarkId>, PathRejection>,
) -> ApiResult<Json<DataResponse<&'static str>>> {
    let id = bookmark_id(path)?;

    state
        .remover()
        .delete_bookmark(id)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to delete bookmark"))?;

    tracing::info!(bookmark_id = id, "Deleted bookmark");

    Ok(Json(DataResponse::new(MSG_DELETED)))
}

/// GET /bookmarks/exists?url= - Check whether a url is bookmarked.
///
/// A miss is a 200 with `{"id": 0, "found": false}`. An undecodable query
/// string, such as a repeated `url`, is a 400.
async fn bookmark_exists(
    State(state): State<AppState>,
    params: Result<Query<ExistsParams>, QueryRejection>,
) -> ApiResult<Json<DataResponse<Existence>>> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected exists query");
        ApiError::BadRequest(MSG_INVALID_REQUEST.to_string())
    })?;
    let url = params.url.unwrap_or_default();

    let existence = state
        .checker()
        .bookmark_exists(&url)
        .await
        .map_err(|e| ApiError::from_store(e, "failed to check bookmark"))?;

    Ok(Json(DataResponse::new(existence)))
}

/// Build bookmark routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route("/bookmarks/exists", get(bookmark_exists))
        .route(
            "/bookmarks/{id}",
            patch(edit_bookmark).delete(delete_bookmark),
        )
}
