//! Configuration for the dashboard and its file server.
//!
//! The browser bundle reads the backend URL at compile time from
//! `GROUPDESK_API_URL`. The `serve` binary loads [`ServeConfig`] via the
//! `config` crate from `GROUPDESK_SERVE__*` environment variables.

use groupdesk_client::ClientConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// Backend URL used when none was provided at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Returns the API client configuration baked into this build.
#[must_use]
pub fn client_config() -> ClientConfig {
    ClientConfig::new(option_env!("GROUPDESK_API_URL").unwrap_or(DEFAULT_API_URL))
}

/// Static file server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServeConfig {
    /// Socket address to listen on.
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Directory holding the built bundle (`index.html` and assets).
    #[serde(default = "default_site_root")]
    pub site_root: PathBuf,
}

fn default_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_site_root() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            site_root: default_site_root(),
        }
    }
}

impl ServeConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    #[cfg(feature = "serve")]
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("GROUPDESK_SERVE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Path of the single-page entry document.
    #[must_use]
    pub fn index_file(&self) -> PathBuf {
        self.site_root.join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_config_has_correct_defaults() {
        let config = ServeConfig::default();
        assert_eq!(config.addr, "127.0.0.1:3000");
        assert_eq!(config.index_file(), PathBuf::from("dist/index.html"));
    }

    #[test]
    fn serve_config_fills_missing_fields() {
        let config: ServeConfig =
            serde_json::from_str(r#"{"site_root":"/srv/groupdesk"}"#).expect("deserialize");
        assert_eq!(config.addr, "127.0.0.1:3000");
        assert_eq!(config.index_file(), PathBuf::from("/srv/groupdesk/index.html"));
    }

    #[test]
    fn client_config_points_at_an_absolute_url() {
        assert!(client_config().base_url.starts_with("http"));
    }
}
