//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::HttpBackendConfig;
use crate::session::SessionConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Board client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 0 disables background polling
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_keep_modal")]
    pub keep_modal_on_failure: bool,
}

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_poll_interval() -> u64 {
    10
}

fn default_keep_modal() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            poll_interval_secs: default_poll_interval(),
            keep_modal_on_failure: default_keep_modal(),
        }
    }
}

impl ClientConfig {
    pub fn http(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            base_url: self.api_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            poll_interval: (self.poll_interval_secs > 0)
                .then(|| Duration::from_secs(self.poll_interval_secs)),
            keep_modal_on_failure: self.keep_modal_on_failure,
        }
    }
}

/// Reference API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Capacity of each seeded category
    #[serde(default = "default_capacity")]
    pub default_capacity: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_capacity() -> usize {
    3
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_capacity: default_capacity(),
        }
    }
}

impl ServerConfig {
    /// Socket address string for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("party-board").join("config.toml")),
            Some(PathBuf::from("/etc/party-board/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Load an explicit file if given, otherwise the default locations
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PARTY_BOARD_API_URL") {
            self.client.api_url = url;
        }

        if let Some(host) = lookup("PARTY_BOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PARTY_BOARD_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid PARTY_BOARD_PORT"),
            }
        }

        if let Some(level) = lookup("PARTY_BOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PARTY_BOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Party Board Configuration
#
# Environment variables override these settings:
# - PARTY_BOARD_API_URL
# - PARTY_BOARD_HOST
# - PARTY_BOARD_PORT
# - PARTY_BOARD_LOG_LEVEL
# - PARTY_BOARD_LOG_FORMAT

[client]
# Backend REST API, including the /api prefix
api_url = "http://localhost:8080/api"

# Per-request timeout (seconds)
request_timeout_secs = 10

# How often the board re-fetches categories (seconds, 0 disables)
poll_interval_secs = 10

# Keep a form open with the error when saving fails
keep_modal_on_failure = true

[server]
# Reference API server host
host = "0.0.0.0"

# Reference API server port
port = 8080

# Capacity of each seeded category
default_capacity = 3

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.client.api_url, "http://localhost:8080/api");
        assert_eq!(config.client.poll_interval_secs, 10);
        assert!(config.client.keep_modal_on_failure);
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.server.default_capacity, 3);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.client.api_url, defaults.client.api_url);
        assert_eq!(config.client.request_timeout_secs, defaults.client.request_timeout_secs);
        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[client]
api_url = "https://party.example.com/api"
poll_interval_secs = 0

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.client.api_url, "https://party.example.com/api");
        assert_eq!(config.client.request_timeout_secs, 10);
        assert_eq!(config.server.port, 8080);
        assert!(config.logging.is_json());
        assert!(config.client.session().poll_interval.is_none());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[client\napi_url = 3").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PARTY_BOARD_API_URL", "http://10.0.0.5:9000/api"),
            ("PARTY_BOARD_PORT", "not-a-port"),
            ("PARTY_BOARD_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.client.api_url, "http://10.0.0.5:9000/api");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_client_conversions() {
        let client = ClientConfig {
            request_timeout_secs: 3,
            poll_interval_secs: 15,
            keep_modal_on_failure: false,
            ..Default::default()
        };

        assert_eq!(client.http().request_timeout_ms, 3_000);
        let session = client.session();
        assert_eq!(session.poll_interval, Some(Duration::from_secs(15)));
        assert!(!session.keep_modal_on_failure);
    }
}
