//! bookmark-server: HTTP API server for the bookmark catalog
//!
//! This crate provides:
//! - REST endpoints to list, search, create, edit, delete and look up bookmarks
//! - Netscape bookmark file export
//! - A health endpoint reporting database connectivity
//! - Per-endpoint fixed-window rate limiting
//!
//! # Architecture
//!
//! The server is built on Axum. Every request passes through:
//! - Request ID generation and propagation
//! - CORS handling
//! - Request tracing and logging
//! - A per-request timeout
//! - The rate limiter (matched routes only)
//!
//! Handlers depend on the narrow store capabilities from `bookmark-store`,
//! never on a concrete backend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bookmark_server::{server, AppState, ServerConfig};
//! use bookmark_store::{Store, StoreConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let store = Arc::new(Store::connect(StoreConfig::from_env()?).await?);
//! let app = server::build_app(AppState::new(store, config.clone()), &config)?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod middleware;
pub mod pagination;
pub mod routes;
pub mod server;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use middleware::rate_limit::{RateLimitConfig, RateLimiter};
pub use state::AppState;

// Re-export dependent crates
pub use bookmark_core;
pub use bookmark_store;
