//! API client configuration.
//!
//! Loaded via the `config` crate from `GROUPDESK__*` environment variables
//! on native targets; the browser build constructs it directly.

use serde::Deserialize;
use std::time::Duration;

/// Configuration for reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API (e.g. "http://localhost:8080/api").
    pub base_url: String,

    /// Request timeout in seconds (native targets only).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Interval between live-update refetches, in seconds.
    #[serde(default = "default_poll_interval_seconds")]
    pub poll_interval_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_poll_interval_seconds() -> u64 {
    5
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: default_timeout_seconds(),
            poll_interval_seconds: default_poll_interval_seconds(),
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Returns the live-update interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    /// Loads configuration from environment variables.
    ///
    /// `GROUPDESK__BASE_URL` is required; `GROUPDESK__TIMEOUT_SECONDS` and
    /// `GROUPDESK__POLL_INTERVAL_SECONDS` are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("GROUPDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
