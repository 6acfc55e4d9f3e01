//! Configuration management for Parley
//!
//! Supports defaults, TOML config files, and environment-variable
//! overrides following the pattern `PARLEY_<SECTION>_<KEY>`.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

mod error;

pub use error::ConfigError;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Store configuration
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON state file
    pub data_file: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // the port the original deployment served on
            bind_address: "127.0.0.1:3001".parse().expect("valid literal address"),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./data.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Example: `PARLEY_SERVER_BIND_ADDRESS=0.0.0.0:3001`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(addr) = env::var("PARLEY_SERVER_BIND_ADDRESS") {
            config.server.bind_address = addr
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid bind address: {}", e)))?;
        }
        if let Ok(data_file) = env::var("PARLEY_STORE_DATA_FILE") {
            config.store.data_file = PathBuf::from(data_file);
        }
        if let Ok(level) = env::var("PARLEY_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = env::var("PARLEY_LOG_JSON") {
            config.logging.json_format = json
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid JSON flag: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;

        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.level.parse::<crate::logging::LogLevel>().is_err() {
            return Err(ConfigError::ValidationFailed(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }

        if self.store.data_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "data_file must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
