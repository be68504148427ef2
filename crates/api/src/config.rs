//! Server configuration
//!
//! Loaded from an optional `climate.toml` in the working directory, then
//! overridden by `CLIMATE_*` environment variables. Nested keys use a double
//! underscore, e.g. `CLIMATE_RATE_LIMIT__BURST_SIZE=50`.

use crate::rate_limit::RateLimitConfig;
use serde::Deserialize;
use std::net::SocketAddr;
use tracing::Level;

/// Default configuration file, looked up relative to the working directory
pub const CONFIG_FILE: &str = "climate.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CLIMATE";

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP listen address
    pub bind_addr: SocketAddr,
    /// SQLite dataset location
    pub database_url: String,
    /// Pool size
    pub max_connections: u32,
    /// trace, debug, info, warn or error
    pub log_level: String,
    /// Emit log lines as JSON
    pub json_logs: bool,
    /// Prometheus exporter address, disabled when unset
    pub metrics_addr: Option<SocketAddr>,
    /// Per-IP rate limiting
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            database_url: "sqlite://Resources/hawaii.sqlite".to_string(),
            max_connections: 4,
            log_level: "info".to_string(),
            json_logs: false,
            metrics_addr: None,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from [`CONFIG_FILE`] and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from the given file (optional) and the environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.level()?;
        Ok(config)
    }

    /// Parsed log level
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
