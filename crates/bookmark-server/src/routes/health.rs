//! Health check endpoint.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub const STATUS_UP: &str = "up";
pub const STATUS_DOWN: &str = "down";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Per-dependency status.
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub postgres: &'static str,
}

/// GET /health - Liveness of the service and its database.
///
/// Returns 503 when the database does not answer a ping within
/// `ServerConfig::ping_timeout`.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let bound = state.config().ping_timeout();

    let (code, status) = match tokio::time::timeout(bound, state.pinger().ping()).await {
        Ok(Ok(())) => (StatusCode::OK, STATUS_UP),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, STATUS_DOWN)
        }
        Err(_) => {
            tracing::warn!(timeout_ms = bound.as_millis() as u64, "Database ping timed out");
            (StatusCode::SERVICE_UNAVAILABLE, STATUS_DOWN)
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            checks: HealthChecks { postgres: status },
        }),
    )
}

/// Build health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
