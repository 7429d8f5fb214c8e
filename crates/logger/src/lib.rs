//! Quill - Logger
//!
//! An owned logging handle over a configured sink. There is no process-wide
//! default logger and nothing here mutates ambient state: construction
//! returns a [`Logger`] value, and everything it needs travels with it.
//!
//! Records below the configured level are discarded before formatting.
//! Emit-path failures (a closed sink, an I/O error) never surface at the
//! call site - they are counted and reported through rate-limited
//! diagnostics instead, so logging can never take the application down.
//!
//! # Example
//!
//! ```ignore
//! use quill_config::Config;
//! use quill_logger::{field, Logger};
//! use std::str::FromStr;
//!
//! let config = Config::from_str(r#"
//! [sinks.app_log]
//! type = "buffered_file"
//! path = "logs/app.log"
//! "#)?;
//!
//! let log = Logger::from_config(&config, "app_log")?;
//! log.info("server started").await;
//! log.log_with(LogLevel::Warn, "slow request", &[field("ms", 1500)]).await;
//! log.close().await?;
//! ```

mod format;
mod record;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use quill_config::{Config, LogLevel, SinkConfig};
use quill_sinks::util::RateLimitedLogger;
use quill_sinks::{Sink, SinkError};

pub use quill_config::LogLevel as Level;
pub use record::{field, Field, FieldValue};

/// Owned logging handle
///
/// Cheap to clone; clones share the sink and counters.
#[derive(Clone)]
#[derive(Debug)]
pub struct Logger {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// Logger name, used in diagnostics
    name: String,

    /// Severity threshold
    level: LogLevel,

    /// Human-readable output instead of JSON lines
    pretty: bool,

    /// Colorize pretty output (console sinks only)
    color: bool,

    /// Destination sink
    sink: Sink,

    /// Records dropped on the emit path
    dropped: AtomicU64,

    /// Rate-limited reporting for emit failures
    emit_errors: RateLimitedLogger,
}

impl Logger {
    /// Create a logger over an already-open sink
    pub fn new(name: impl Into<String>, sink: Sink, level: LogLevel, pretty: bool) -> Self {
        let color = pretty && matches!(sink, Sink::Console(_));
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                level,
                pretty,
                color,
                sink,
                dropped: AtomicU64::new(0),
                emit_errors: RateLimitedLogger::default(),
            }),
        }
    }

    /// Open the configured sink and wrap it in a logger
    ///
    /// # Errors
    ///
    /// Construction failures (missing path, unopenable file) are fatal and
    /// propagate; nothing is left running.
    pub fn open(name: impl Into<String>, config: &SinkConfig) -> Result<Self, SinkError> {
        let name = name.into();
        let sink = Sink::open(&name, config)?;
        Ok(Self::new(name, sink, config.level(), config.pretty()))
    }

    /// Build a logger for a named sink from the loaded configuration
    pub fn from_config(config: &Config, name: &str) -> Result<Self, SinkError> {
        let sink_config = config
            .sink(name)
            .map_err(|e| SinkError::config(e.to_string()))?;
        Self::open(name, sink_config)
    }

    /// Whether records at `level` pass the threshold
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.inner.level
    }

    /// Emit a record
    pub async fn log(&self, level: LogLevel, message: &str) {
        self.log_with(level, message, &[]).await;
    }

    /// Emit a record with fields
    ///
    /// Below-threshold records return without formatting. Sink errors are
    /// swallowed by design: the record is counted as dropped and the error
    /// reported through rate-limited diagnostics.
    pub async fn log_with(&self, level: LogLevel, message: &str, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }

        let now = Utc::now();
        let line = if self.inner.pretty {
            format::format_pretty(now, level, message, fields, self.inner.color)
        } else {
            format::format_json(now, level, message, fields)
        };

        if let Err(e) = self.inner.sink.write(line).await {
            self.inner.dropped.fetch_add(1, Ordering::Relaxed);
            self.inner
                .emit_errors
                .error(&format!("logger '{}' failed to emit record", self.inner.name), &e);
        }
    }

    /// Emit at trace level
    pub async fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message).await;
    }

    /// Emit at debug level
    pub async fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message).await;
    }

    /// Emit at info level
    pub async fn info(&self, message: &str) {
        self.log(LogLevel::Info, message).await;
    }

    /// Emit at warn level
    pub async fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message).await;
    }

    /// Emit at error level
    pub async fn error(&self, message: &str) {
        self.log(LogLevel::Error, message).await;
    }

    /// Close the underlying sink, flushing outstanding records
    pub async fn close(&self) -> Result<(), SinkError> {
        self.inner.sink.close().await
    }

    /// Logger name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Severity threshold
    pub fn level(&self) -> LogLevel {
        self.inner.level
    }

    /// Records dropped on the emit path since construction
    pub fn dropped_records(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }

    /// The underlying sink
    pub fn sink(&self) -> &Sink {
        &self.inner.sink
    }
}
