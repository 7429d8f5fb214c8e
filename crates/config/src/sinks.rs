//! Sink configuration types
//!
//! Configuration for all log output sinks (console, file, buffered file).
//!
//! Sinks are named instances, allowing multiple sinks of the same type
//! (e.g., a pretty stderr sink for development next to a buffered file
//! sink for production).

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::level::LogLevel;

/// Default output buffer size in bytes (32 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;

/// Default pending-queue capacity for the buffered file sink
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Default flush interval for the buffered file sink
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Container for all sink configurations
///
/// Sinks are stored as a map of name -> config.
///
/// # Example
///
/// ```toml
/// [sinks.console]
/// type = "stderr"
/// pretty = true
///
/// [sinks.app_log]
/// type = "buffered_file"
/// path = "logs/app.log"
///
/// [sinks.audit]
/// type = "file"
/// path = "logs/audit.log"
/// level = "warn"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SinksConfig {
    /// Named sink instances
    #[serde(flatten)]
    sinks: HashMap<String, SinkConfig>,
}

impl SinksConfig {
    /// Get a sink by name
    pub fn get(&self, name: &str) -> Option<&SinkConfig> {
        self.sinks.get(name)
    }

    /// Check if a sink exists
    pub fn contains(&self, name: &str) -> bool {
        self.sinks.contains_key(name)
    }

    /// Iterate over all sinks
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SinkConfig)> {
        self.sinks.iter()
    }

    /// Get the number of configured sinks
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Check if no sinks are configured
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Get all sink names
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.sinks.keys()
    }
}

/// Configuration for a single sink instance
///
/// The `type` field selects the sink implementation:
/// - `stdout` / `stderr` -> buffered console output
/// - `file` -> plain file output, written on the caller's thread
/// - `buffered_file` -> non-blocking file output behind a bounded queue
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    /// Console sink writing to stdout
    Stdout(ConsoleSinkConfig),

    /// Console sink writing to stderr
    Stderr(ConsoleSinkConfig),

    /// Plain file sink - writes happen on the caller's thread
    File(FileSinkConfig),

    /// Non-blocking buffered file sink - writes are queued to a
    /// background worker
    BufferedFile(BufferedFileSinkConfig),
}

impl SinkConfig {
    /// Check if the sink is enabled
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Stdout(c) | Self::Stderr(c) => c.enabled,
            Self::File(c) => c.enabled,
            Self::BufferedFile(c) => c.enabled,
        }
    }

    /// Get the sink type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Stdout(_) => "stdout",
            Self::Stderr(_) => "stderr",
            Self::File(_) => "file",
            Self::BufferedFile(_) => "buffered_file",
        }
    }

    /// Severity threshold for records routed to this sink
    pub fn level(&self) -> LogLevel {
        match self {
            Self::Stdout(c) | Self::Stderr(c) => c.level,
            Self::File(c) => c.level,
            Self::BufferedFile(c) => c.level,
        }
    }

    /// Whether records should be formatted for humans rather than machines
    pub fn pretty(&self) -> bool {
        match self {
            Self::Stdout(c) | Self::Stderr(c) => c.pretty,
            Self::File(c) => c.pretty,
            Self::BufferedFile(c) => c.pretty,
        }
    }
}

/// Console sink configuration (stdout or stderr)
///
/// # Example
///
/// ```toml
/// [sinks.console]
/// type = "stderr"
/// level = "debug"
/// pretty = true
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleSinkConfig {
    /// Whether this sink is enabled
    /// Default: true
    pub enabled: bool,

    /// Severity threshold
    /// Default: info
    pub level: LogLevel,

    /// Human-readable output instead of JSON lines
    /// Default: false
    pub pretty: bool,

    /// Output buffer size in bytes
    /// Default: 32 KiB
    pub buffer_size: usize,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
            pretty: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Plain file sink configuration
///
/// # Example
///
/// ```toml
/// [sinks.audit]
/// type = "file"
/// path = "logs/audit.log"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    /// Whether this sink is enabled
    /// Default: true
    pub enabled: bool,

    /// Severity threshold
    /// Default: info
    pub level: LogLevel,

    /// Human-readable output instead of JSON lines
    /// Default: false
    pub pretty: bool,

    /// Destination file path
    /// Required when enabled
    pub path: String,

    /// Output buffer size in bytes
    /// Default: 32 KiB
    pub buffer_size: usize,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
            pretty: false,
            path: String::new(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Non-blocking buffered file sink configuration
///
/// Writes are enqueued onto a bounded queue and appended to the file by a
/// background worker, so call sites never wait on disk I/O.
///
/// # Example
///
/// ```toml
/// [sinks.app_log]
/// type = "buffered_file"
/// path = "logs/app.log"
/// queue_capacity = 4096
/// flush_interval = "500ms"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BufferedFileSinkConfig {
    /// Whether this sink is enabled
    /// Default: true
    pub enabled: bool,

    /// Severity threshold
    /// Default: info
    pub level: LogLevel,

    /// Human-readable output instead of JSON lines
    /// Default: false
    pub pretty: bool,

    /// Destination file path
    /// Required when enabled
    pub path: String,

    /// Pending-queue capacity in records
    /// Default: 1024
    pub queue_capacity: usize,

    /// Output buffer size in bytes
    /// Default: 32 KiB
    pub buffer_size: usize,

    /// Periodic flush interval
    /// Default: 1s
    #[serde(with = "humantime_serde")]
    pub flush_interval: Duration,
}

impl Default for BufferedFileSinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
            pretty: false,
            path: String::new(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            buffer_size: DEFAULT_BUFFER_SIZE,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sink_defaults() {
        let config = ConsoleSinkConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, LogLevel::Info);
        assert!(!config.pretty);
        assert_eq!(config.buffer_size, 32 * 1024);
    }

    #[test]
    fn test_file_sink_defaults() {
        let config = FileSinkConfig::default();
        assert!(config.enabled);
        assert!(config.path.is_empty());
        assert_eq!(config.buffer_size, 32 * 1024);
    }

    #[test]
    fn test_buffered_file_sink_defaults() {
        let config = BufferedFileSinkConfig::default();
        assert!(config.enabled);
        assert_eq!(config.queue_capacity, 1024);
        assert_eq!(config.buffer_size, 32 * 1024);
        assert_eq!(config.flush_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_deserialize_stdout() {
        let toml = r#"
[console]
type = "stdout"
"#;
        let config: SinksConfig = toml::from_str(toml).unwrap();
        assert!(config.contains("console"));
        let sink = config.get("console").unwrap();
        assert!(sink.is_enabled());
        assert_eq!(sink.type_name(), "stdout");
    }

    #[test]
    fn test_deserialize_multiple_sinks() {
        let toml = r#"
[console]
type = "stderr"
pretty = true
level = "debug"

[app_log]
type = "buffered_file"
path = "logs/app.log"
queue_capacity = 512
flush_interval = "250ms"

[audit]
type = "file"
path = "logs/audit.log"
level = "warn"
"#;
        let config: SinksConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.len(), 3);
        assert!(config.contains("console"));
        assert!(config.contains("app_log"));
        assert!(config.contains("audit"));

        if let Some(SinkConfig::BufferedFile(buf)) = config.get("app_log") {
            assert_eq!(buf.path, "logs/app.log");
            assert_eq!(buf.queue_capacity, 512);
            assert_eq!(buf.flush_interval, Duration::from_millis(250));
        } else {
            panic!("Expected buffered_file config");
        }

        if let Some(SinkConfig::File(file)) = config.get("audit") {
            assert_eq!(file.path, "logs/audit.log");
            assert_eq!(file.level, LogLevel::Warn);
        } else {
            panic!("Expected file config");
        }
    }

    #[test]
    fn test_deserialize_disabled_sink() {
        let toml = r#"
[debug_sink]
type = "stdout"
enabled = false
"#;
        let config: SinksConfig = toml::from_str(toml).unwrap();

        let sink = config.get("debug_sink").unwrap();
        assert!(!sink.is_enabled());
    }

    #[test]
    fn test_deserialize_unknown_type_rejected() {
        let toml = r#"
[weird]
type = "carrier_pigeon"
"#;
        let result: std::result::Result<SinksConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_level_and_pretty_accessors() {
        let toml = r#"
[console]
type = "stdout"
level = "error"
pretty = true
"#;
        let config: SinksConfig = toml::from_str(toml).unwrap();
        let sink = config.get("console").unwrap();
        assert_eq!(sink.level(), LogLevel::Error);
        assert!(sink.pretty());
    }

    #[test]
    fn test_empty_sinks() {
        let config: SinksConfig = toml::from_str("").unwrap();
        assert!(config.is_empty());
        assert_eq!(config.len(), 0);
    }

    #[test]
    fn test_sink_names() {
        let toml = r#"
[a]
type = "stdout"

[b]
type = "stderr"

[c]
type = "stdout"
"#;
        let config: SinksConfig = toml::from_str(toml).unwrap();

        let names: Vec<_> = config.names().collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&&"a".to_string()));
        assert!(names.contains(&&"b".to_string()));
        assert!(names.contains(&&"c".to_string()));
    }
}
