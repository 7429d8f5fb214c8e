//! Configuration validation
//!
//! Validates config consistency:
//! - File-backed sinks have a destination path
//! - Queue capacity and buffer sizes are non-zero

use crate::error::{ConfigError, Result};
use crate::sinks::SinkConfig;
use crate::Config;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_sinks(config)
}

/// Validate sink configurations
fn validate_sinks(config: &Config) -> Result<()> {
    for (name, sink) in config.sinks.iter() {
        if !sink.is_enabled() {
            continue;
        }

        match sink {
            SinkConfig::Stdout(console) | SinkConfig::Stderr(console) => {
                if console.buffer_size == 0 {
                    return Err(ConfigError::invalid_value(
                        "sink",
                        name,
                        "buffer_size",
                        "must be greater than zero",
                    ));
                }
            }
            SinkConfig::File(file) => {
                if file.path.is_empty() {
                    return Err(ConfigError::missing_field("sink", name, "path"));
                }
                if file.buffer_size == 0 {
                    return Err(ConfigError::invalid_value(
                        "sink",
                        name,
                        "buffer_size",
                        "must be greater than zero",
                    ));
                }
            }
            SinkConfig::BufferedFile(buffered) => {
                if buffered.path.is_empty() {
                    return Err(ConfigError::missing_field("sink", name, "path"));
                }
                if buffered.queue_capacity == 0 {
                    return Err(ConfigError::invalid_value(
                        "sink",
                        name,
                        "queue_capacity",
                        "must be greater than zero",
                    ));
                }
                if buffered.buffer_size == 0 {
                    return Err(ConfigError::invalid_value(
                        "sink",
                        name,
                        "buffer_size",
                        "must be greater than zero",
                    ));
                }
            }
        }
    }

    Ok(())
}
