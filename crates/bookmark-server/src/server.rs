//! Router assembly and the serve loop.

use std::future::{Future, IntoFuture};
use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    extract::Request,
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ServerConfig};
use crate::error::ApiError;
use crate::middleware::rate_limit::{
    HEADER_LIMIT, HEADER_REMAINING, HEADER_RESET, HEADER_RETRY_AFTER,
};
use crate::middleware::request_id::{
    REQUEST_ID_HEADER, propagate_request_id_layer, request_id_layer, request_id_of,
};
use crate::routes::{self, bookmarks::TOTAL_HEADER};
use crate::state::AppState;

/// Build the full application: routes plus the middleware stack.
pub fn build_app(state: AppState, config: &ServerConfig) -> Result<Router, ConfigError> {
    with_middleware(routes::build_router(state), config)
}

/// Wrap `router` in the service middleware.
///
/// From the outside in: request id, request id propagation, CORS, tracing,
/// timeout. A request that outlives `config.request_timeout` is dropped and
/// answered with a JSON 408.
pub fn with_middleware(router: Router, config: &ServerConfig) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&config.cors_allowed_origins)?;

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id_of(request),
        )
    });

    let timeout = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(config.request_timeout));

    Ok(router
        .layer(timeout)
        .layer(trace)
        .layer(cors)
        .layer(propagate_request_id_layer())
        .layer(request_id_layer()))
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        tracing::warn!("Request timed out");
        ApiError::RequestTimeout.into_response()
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        ApiError::Internal("internal error".to_string()).into_response()
    }
}

/// Build CORS layer from configuration.
///
/// `"*"` allows any origin; otherwise a comma-separated origin list.
pub fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    let origin = if allowed_origins.trim() == "*" {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>().map_err(|_| ConfigError::InvalidValue {
                    name: "CORS_ALLOWED_ORIGINS".to_string(),
                    reason: format!("invalid origin \"{}\"", s),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            TOTAL_HEADER,
            HeaderName::from_static(HEADER_LIMIT),
            HeaderName::from_static(HEADER_REMAINING),
            HeaderName::from_static(HEADER_RESET),
            HeaderName::from_static(HEADER_RETRY_AFTER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]))
}

/// Serve `app` until `signal` resolves, then drain.
///
/// After the signal no new connections are accepted. In-flight requests get
/// `grace` to finish. Once it elapses this returns regardless; connections
/// still open are abandoned and torn down with the runtime when the process
/// exits.
pub async fn serve_with_grace<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut server = std::pin::pin!(server.into_future());

    tokio::select! {
        result = &mut server => return result,
        () = signal => {}
    }

    tracing::info!(grace_secs = grace.as_secs_f64(), "Draining in-flight requests");
    let _ = stop_tx.send(());

    match tokio::time::timeout(grace, server).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Grace period elapsed, closing remaining connections");
            Ok(())
        }
    }
}
