//! Configuration management for presto-metrico
//!
//! Handles loading and validating configuration from YAML files. The
//! resulting [`Config`] is built once at startup and passed by reference
//! into the collector; nothing reads the environment after that.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing the configuration file
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// No coordinator address was supplied by any source
    #[error("Missing coordinator address (use --coordinator or PRESTO_COORDINATOR)")]
    MissingCoordinator,

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Presto coordinator configuration
    #[serde(default)]
    pub coordinator: CoordinatorConfig,

    /// DogStatsD target configuration
    #[serde(default)]
    pub statsd: StatsdConfig,

    /// Collection schedule
    #[serde(default)]
    pub collection: CollectionConfig,
}

/// Presto coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Coordinator base address, e.g. `http://presto:8080`
    #[serde(default)]
    pub url: String,

    /// Per-bean request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

/// DogStatsD target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsdConfig {
    /// UDP address of the statsd agent
    #[serde(default = "default_statsd_address")]
    pub address: String,
}

/// Collection schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Seconds between collection passes
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

// Default value functions
fn default_timeout() -> u64 {
    5000
}

fn default_statsd_address() -> String {
    "127.0.0.1:8125".to_string()
}

fn default_interval() -> u64 {
    15
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_ms: default_timeout(),
        }
    }
}

impl Default for StatsdConfig {
    fn default() -> Self {
        Self {
            address: default_statsd_address(),
        }
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// Only parses; call [`Config::validate`] once CLI overrides are applied,
    /// since the coordinator address commonly arrives from the command line.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from an optional YAML file, falling back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.coordinator.url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingCoordinator);
        }

        url::Url::parse(url).map_err(|e| {
            ConfigError::ValidationError(format!("Invalid coordinator url '{}': {}", url, e))
        })?;

        if self.coordinator.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Coordinator timeout must be greater than 0".to_string(),
            ));
        }

        if self.collection.interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Collection interval must be greater than 0".to_string(),
            ));
        }

        if self.statsd.address.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Statsd address must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.coordinator.url = "http://presto:8080".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.statsd.address, "127.0.0.1:8125");
        assert_eq!(config.collection.interval_secs, 15);
        assert_eq!(config.coordinator.timeout_ms, 5000);
        assert!(config.coordinator.url.is_empty());
    }

    #[test]
    fn test_missing_coordinator_is_rejected() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingCoordinator)
        ));
    }

    #[test]
    fn test_config_validation() {
        assert!(valid_config().validate().is_ok());

        let mut config = valid_config();
        config.collection.interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.coordinator.timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.coordinator.url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
coordinator:
  url: "http://presto:8080"
collection:
  interval_secs: 10
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.coordinator.url, "http://presto:8080");
        assert_eq!(config.coordinator.timeout_ms, 5000);
        assert_eq!(config.collection.interval_secs, 10);
        assert_eq!(config.statsd.address, "127.0.0.1:8125");
    }
}
