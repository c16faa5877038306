//! Application state shared across handlers.

use std::sync::Arc;

use bookmark_store::{
    BookmarkChecker, BookmarkCreator, BookmarkEditor, BookmarkPager, BookmarkRemover,
    BookmarkStore, Pinger,
};

use crate::config::ServerConfig;
use crate::middleware::rate_limit::RateLimiter;

/// Application state shared across all handlers.
///
/// Each handler reaches the store only through the capability it needs. All
/// capabilities usually point at the same store instance.
#[derive(Clone)]
pub struct AppState {
    pager: Arc<dyn BookmarkPager>,
    creator: Arc<dyn BookmarkCreator>,
    editor: Arc<dyn BookmarkEditor>,
    remover: Arc<dyn BookmarkRemover>,
    checker: Arc<dyn BookmarkChecker>,
    pinger: Arc<dyn Pinger>,
    /// Per-endpoint request limiter.
    limiter: Arc<RateLimiter>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state backed by `store`.
    ///
    /// The rate limiter is built from `config.rate_limit`.
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: BookmarkStore + 'static,
    {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit));
        Self {
            pager: store.clone(),
            creator: store.clone(),
            editor: store.clone(),
            remover: store.clone(),
            checker: store.clone(),
            pinger: store,
            limiter,
            config: Arc::new(config),
        }
    }

    /// Replace the rate limiter.
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn pager(&self) -> &dyn BookmarkPager {
        self.pager.as_ref()
    }

    pub fn creator(&self) -> &dyn BookmarkCreator {
        self.creator.as_ref()
    }

    pub fn editor(&self) -> &dyn BookmarkEditor {
        self.editor.as_ref()
    }

    pub fn remover(&self) -> &dyn BookmarkRemover {
        self.remover.as_ref()
    }

    pub fn checker(&self) -> &dyn BookmarkChecker {
        self.checker.as_ref()
    }

    pub fn pinger(&self) -> &dyn Pinger {
        self.pinger.as_ref()
    }

    /// Get a reference to the rate limiter.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}
