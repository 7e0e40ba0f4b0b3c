//! Process configuration.
//!
//! One TOML file with a section per subsystem, read once at startup and
//! immutable afterwards; there is no hot-reload. The file path comes
//! from the CLI (or the `AGGREGATOR_CONFIG_FILE` environment variable).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use aggregator_broker::BrokerConfig;
use aggregator_server::ServerConfig;
use aggregator_storage::StorageConfig;

/// Errors while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to parse config file {0}: {1}")]
    Parse(String, #[source] toml::de::Error),
}

/// Full process configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub broker: BrokerConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Read and parse the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(path.display().to_string(), e))
    }
}
