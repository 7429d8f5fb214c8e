//! Quill Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use quill_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[sinks.console]\ntype = \"stdout\"").unwrap();
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [sinks.console]
//! type = "stderr"
//! pretty = true
//!
//! [sinks.app_log]
//! type = "buffered_file"
//! path = "logs/app.log"
//! queue_capacity = 1024
//! buffer_size = 32768
//! flush_interval = "1s"
//! ```

mod error;
mod level;
mod sinks;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use level::LogLevel;
pub use sinks::{
    BufferedFileSinkConfig, ConsoleSinkConfig, FileSinkConfig, SinkConfig, SinksConfig,
    DEFAULT_BUFFER_SIZE, DEFAULT_FLUSH_INTERVAL, DEFAULT_QUEUE_CAPACITY,
};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log output sinks
    pub sinks: SinksConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Checks that file-backed sinks carry a destination path and that
    /// capacities are non-zero.
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Look up a sink by name
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownSink` if no sink with that name exists.
    pub fn sink(&self, name: &str) -> Result<&SinkConfig> {
        self.sinks
            .get(name)
            .ok_or_else(|| ConfigError::unknown_sink(name))
    }

    /// Get list of enabled sink names
    pub fn enabled_sinks(&self) -> Vec<String> {
        self.sinks
            .iter()
            .filter(|(_, sink)| sink.is_enabled())
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert!(config.sinks.is_empty());
    }

    #[test]
    fn test_minimal_config() {
        let toml = r#"
[sinks.console]
type = "stdout"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.sinks.len(), 1);
        assert!(config.sinks.get("console").is_some());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[sinks.console]
type = "stderr"
level = "debug"
pretty = true

[sinks.app_log]
type = "buffered_file"
path = "logs/app.log"
queue_capacity = 2048
buffer_size = 65536
flush_interval = "500ms"

[sinks.audit]
type = "file"
path = "logs/audit.log"
level = "warn"
"#;
        let config = Config::from_str(toml).unwrap();

        assert_eq!(config.sinks.len(), 3);
        assert_eq!(config.sink("console").unwrap().type_name(), "stderr");
        assert_eq!(config.sink("app_log").unwrap().type_name(), "buffered_file");
        assert_eq!(config.sink("audit").unwrap().type_name(), "file");
        assert_eq!(config.enabled_sinks().len(), 3);
    }

    #[test]
    fn test_unknown_sink_lookup() {
        let config = Config::from_str("").unwrap();
        let err = config.sink("missing").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSink { .. }));
    }

    #[test]
    fn test_enabled_sinks_filters_disabled() {
        let toml = r#"
[sinks.on]
type = "stdout"

[sinks.off]
type = "stderr"
enabled = false
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.enabled_sinks(), vec!["on".to_string()]);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(result.is_err());
    }
}
