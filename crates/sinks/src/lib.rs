//! Quill - Sinks
//!
//! Output sinks for Quill loggers.
//!
//! # Architecture
//!
//! Console and plain file sinks write on the caller's thread through a
//! mutex-guarded `BufWriter`. The buffered file sink decouples callers from
//! disk I/O entirely:
//!
//! ```text
//! [Logger] --Bytes--> [bounded queue] --> [worker task] --> [file]
//! ```
//!
//! # Available Sinks
//!
//! | Sink | Destination | Write path |
//! |------|-------------|------------|
//! | `console` | stdout / stderr | synchronous, buffered |
//! | `file` | file | synchronous, buffered |
//! | `buffered` | file | queued to background worker |
//!
//! # Example
//!
//! ```ignore
//! use quill_sinks::buffered::{BufferedFileConfig, BufferedFileSink};
//!
//! let sink = BufferedFileSink::open(BufferedFileConfig::new("logs/app.log"))?;
//! sink.write("payload\n").await?;
//! sink.close().await?;
//! ```

// =============================================================================
// Sink implementations (each in its own submodule)
// =============================================================================

/// Console sink - buffered stdout/stderr output
pub mod console;

/// Plain file sink - synchronous buffered file output
pub mod file;

/// Buffered file sink - non-blocking file output behind a bounded queue
pub mod buffered;

// =============================================================================
// Shared utilities
// =============================================================================

/// Shared utilities for sinks (rate-limited diagnostics)
pub mod util;

/// Common types shared by all sinks (errors, metrics)
mod common;

/// Unified sink handle and config-driven construction
mod sink;

// =============================================================================
// Public re-exports
// =============================================================================

pub use common::{MetricsSnapshot, ShutdownErrors, SinkError, SinkMetrics};
pub use sink::Sink;

// Re-export main sink types for convenience
pub use buffered::{BufferedFileConfig, BufferedFileSink, BufferedFileSinkMetricsHandle};
pub use console::{ConsoleSink, ConsoleStream};
pub use file::FileSink;

// Tests are registered in their respective modules via #[cfg(test)]
// See: common.rs, buffered/mod.rs, file/mod.rs, console/mod.rs, sink.rs
