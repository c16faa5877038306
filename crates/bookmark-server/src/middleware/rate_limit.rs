//! Per-endpoint fixed-window rate limiting.
//!
//! Requests are counted per endpoint (`METHOD /route/template`), not per
//! caller: the limit protects backend capacity for an operation. Each key has
//! its own window that starts at its first request and resets once `window`
//! has elapsed.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{HeaderMap, HeaderValue};

use crate::error::ApiError;
use crate::routes::API_V1_PREFIX;
use crate::state::AppState;

/// Default maximum requests per window.
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 5;

/// Default window length.
pub const DEFAULT_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(1);

pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RESET: &str = "x-ratelimit-reset";
pub const HEADER_RETRY_AFTER: &str = "retry-after";

/// Rate limit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            window: DEFAULT_RATE_LIMIT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the current window resets.
    pub reset_after: Duration,
}

impl Decision {
    /// Seconds until reset, rounded up.
    pub fn reset_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// Write the rate limit headers; `Retry-After` only on rejection.
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        headers.insert(HEADER_LIMIT, HeaderValue::from(self.limit));
        headers.insert(HEADER_REMAINING, HeaderValue::from(self.remaining));
        headers.insert(HEADER_RESET, HeaderValue::from(self.reset_secs()));
        if !self.allowed {
            headers.insert(HEADER_RETRY_AFTER, HeaderValue::from(self.reset_secs()));
        }
    }
}

/// Fixed-window request counter keyed by endpoint.
///
/// Owned and injected through `AppState`; tests build isolated instances.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    /// Create a limiter with empty counters.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Get the limiter configuration.
    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Count a request for `key` now.
    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    /// Count a request for `key` at `now`.
    ///
    /// Admitted requests are counted; rejected ones are not.
    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.saturating_duration_since(window.started) >= self.config.window {
            window.started = now;
            window.count = 0;
        }

        let reset_after = self
            .config
            .window
            .saturating_sub(now.saturating_duration_since(window.started));

        if window.count >= self.config.max_requests {
            return Decision {
                allowed: false,
                limit: self.config.max_requests,
                remaining: 0,
                reset_after,
            };
        }

        window.count += 1;
        Decision {
            allowed: true,
            limit: self.config.max_requests,
            remaining: self.config.max_requests - window.count,
            reset_after,
        }
    }

    /// Drop all counters.
    pub fn reset(&self) {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Endpoint key for a request: method plus route template.
///
/// The versioned mount shares its key with the root one, so an operation has
/// a single budget however it is reached.
pub fn endpoint_key(request: &Request) -> String {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str())
        .unwrap_or_else(|| request.uri().path());

    format!("{} {}", request.method(), unversioned(path))
}

fn unversioned(path: &str) -> &str {
    match path.strip_prefix(API_V1_PREFIX) {
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Middleware enforcing the limiter held in `AppState`.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = endpoint_key(&request);
    let decision = state.rate_limiter().check(&key);

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        tracing::warn!(
            endpoint = %key,
            limit = decision.limit,
            "Rate limit exceeded"
        );
        ApiError::TooManyRequests.into_response()
    };

    decision.apply_headers(response.headers_mut());
    response
}
