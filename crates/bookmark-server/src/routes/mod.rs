//! Route definitions for the HTTP API.

pub mod bookmarks;
pub mod export;
pub mod health;

use axum::{Router, middleware};
use serde::Serialize;

use crate::middleware::rate_limit::enforce_rate_limit;
use crate::state::AppState;

/// Prefix under which the bookmark routes are also served.
pub const API_V1_PREFIX: &str = "/api/v1";

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Build the complete router with all routes.
///
/// Bookmark routes are served both at the root and under [`API_V1_PREFIX`].
/// Every matched route, `/health` included, passes through the rate limiter.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(export::routes())
        .merge(bookmarks::routes());

    Router::new()
        .merge(health::routes())
        .merge(api.clone())
        .nest(API_V1_PREFIX, api)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_rate_limit,
        ))
        .with_state(state)
}
