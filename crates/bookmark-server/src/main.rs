//! Entry point for the bookmark-server binary.

use std::sync::Arc;

use bookmark_server::{
    config::{LogFormat, ServerConfig},
    server::{build_app, serve_with_grace},
    state::AppState,
};
use bookmark_store::{BookmarkStore, Store, StoreConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level, config.log_format);

    tracing::info!("Starting bookmark-server");
    tracing::info!(
        "Configuration: port={}, log_level={}, rate_limit={}/{:?}",
        config.port,
        config.log_level,
        config.rate_limit.max_requests,
        config.rate_limit.window
    );

    // Connect to database
    let store_config = StoreConfig::from_env()?;
    config.check_store_acquire_timeout(store_config.acquire_timeout)?;
    let store = Arc::new(Store::connect(store_config).await?);
    tracing::info!("Connected to database");

    let state = AppState::new(store.clone(), config.clone());
    let app = build_app(state, &config)?;

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    let served = serve_with_grace(listener, app, shutdown_signal(), config.shutdown_grace).await;

    store.close().await;
    tracing::info!("Server shutdown complete");

    served?;
    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over `LOG_LEVEL` when set.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
///
/// A handler that cannot be installed never fires; the other one still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
