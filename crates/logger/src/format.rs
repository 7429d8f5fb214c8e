//! Record formatting
//!
//! Two formats, selected by the sink's `pretty` flag:
//!
//! - pretty: one aligned human-readable line, level colorized when the
//!   destination is a terminal stream
//! - structured: one JSON object per line
//!
//! ```text
//! 07:34:59.161 INFO  server started port=8080
//! {"ts":"2025-01-15T07:34:59.161Z","level":"info","message":"server started","port":8080}
//! ```

use std::fmt::Write as FmtWrite;

use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Style};
use serde_json::{Map, Value};

use quill_config::LogLevel;

use crate::record::Field;

/// Timestamp format for structured output
const JSON_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Timestamp format for pretty output
const PRETTY_TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// Get style for log level
fn level_style(level: LogLevel, enabled: bool) -> Style {
    if !enabled {
        return Style::new();
    }
    match level {
        LogLevel::Error => Style::new().red(),
        LogLevel::Warn => Style::new().yellow(),
        LogLevel::Info | LogLevel::Debug => Style::new(),
        LogLevel::Trace => Style::new().dimmed(),
    }
}

/// Format a record as a human-readable line
pub(crate) fn format_pretty(
    now: DateTime<Utc>,
    level: LogLevel,
    message: &str,
    fields: &[Field],
    color: bool,
) -> String {
    let mut line = String::with_capacity(64 + message.len());

    let _ = write!(
        line,
        "{} {} {}",
        now.format(PRETTY_TIMESTAMP_FORMAT),
        level.padded().style(level_style(level, color)),
        message,
    );

    for field in fields {
        let _ = write!(line, " {}={}", field.key, field.value);
    }

    line.push('\n');
    line
}

/// Format a record as a JSON line
pub(crate) fn format_json(
    now: DateTime<Utc>,
    level: LogLevel,
    message: &str,
    fields: &[Field],
) -> String {
    let mut record = Map::new();
    record.insert(
        "ts".to_string(),
        Value::String(now.format(JSON_TIMESTAMP_FORMAT).to_string()),
    );
    record.insert(
        "level".to_string(),
        Value::String(level.as_str().to_string()),
    );
    record.insert("message".to_string(), Value::String(message.to_string()));

    for field in fields {
        record.insert(field.key.to_string(), field.value.to_json());
    }

    let mut line = Value::Object(record).to_string();
    line.push('\n');
    line
}
