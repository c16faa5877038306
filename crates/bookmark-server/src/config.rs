//! Server configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::middleware::rate_limit::RateLimitConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected \"text\" or \"json\", got \"{}\"", other)),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub host: IpAddr,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Upper bound on handling a single request.
    pub request_timeout: Duration,
    /// How long in-flight requests get to finish after a shutdown signal.
    pub shutdown_grace: Duration,
    /// Per-endpoint admission limits.
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            cors_allowed_origins: "*".to_string(),
            request_timeout: Duration::from_secs(4),
            shutdown_grace: Duration::from_secs(5),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// All optional:
    /// - `HOST`: Listen address (default: 0.0.0.0)
    /// - `PORT`: Server port (default: 8080)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `LOG_FORMAT`: "text" or "json" (default: "text")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 4)
    /// - `SHUTDOWN_GRACE_SECS`: Graceful shutdown bound (default: 5)
    /// - `RATE_LIMIT_MAX_REQUESTS`: Requests per window per endpoint (default: 5)
    /// - `RATE_LIMIT_WINDOW_SECS`: Rate limit window (default: 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_var(&lookup, "HOST")?.unwrap_or(defaults.host);

        let port: u16 = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                name: "PORT".to_string(),
                reason: "port must be between 1 and 65535".to_string(),
            });
        }

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::InvalidValue {
                name: "LOG_FORMAT".to_string(),
                reason,
            })?,
            None => defaults.log_format,
        };

        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);

        let request_timeout = parse_var::<u64, _>(&lookup, "REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        if request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let shutdown_grace = parse_var::<u64, _>(&lookup, "SHUTDOWN_GRACE_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.shutdown_grace);

        let max_requests: u32 = parse_var(&lookup, "RATE_LIMIT_MAX_REQUESTS")?
            .unwrap_or(defaults.rate_limit.max_requests);
        if max_requests == 0 {
            return Err(ConfigError::InvalidValue {
                name: "RATE_LIMIT_MAX_REQUESTS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let window = parse_var::<u64, _>(&lookup, "RATE_LIMIT_WINDOW_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.rate_limit.window);
        if window.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "RATE_LIMIT_WINDOW_SECS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            log_level,
            log_format,
            cors_allowed_origins,
            request_timeout,
            shutdown_grace,
            rate_limit: RateLimitConfig {
                max_requests,
                window,
            },
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Upper bound on the database ping behind `/health`.
    ///
    /// Half the request timeout, so a hanging ping is reported as `down`
    /// before the request itself times out.
    pub fn ping_timeout(&self) -> Duration {
        self.request_timeout / 2
    }

    /// Check that the store gives up waiting for a connection before the
    /// request timeout fires.
    ///
    /// Otherwise an unreachable database would be reported as a timed out
    /// request instead of a store failure.
    pub fn check_store_acquire_timeout(
        &self,
        acquire_timeout: Duration,
    ) -> Result<(), ConfigError> {
        if acquire_timeout >= self.request_timeout {
            return Err(ConfigError::InvalidValue {
                name: "DATABASE_ACQUIRE_TIMEOUT_SECS".to_string(),
                reason: format!(
                    "must be shorter than REQUEST_TIMEOUT_SECS ({}s), got {}s",
                    self.request_timeout.as_secs(),
                    acquire_timeout.as_secs()
                ),
            });
        }
        Ok(())
    }
}

/// Parse an optional variable; present-but-unparseable is an error.
fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
