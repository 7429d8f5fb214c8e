//! Console sink - stdout/stderr output
//!
//! Buffers writes to the process streams (32 KiB by default, mirroring the
//! file sinks) so bursty logging does not translate into one syscall per
//! record. Closing a console sink flushes the buffer but leaves the stream
//! open - stdout and stderr belong to the process, not to us.

use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::{MetricsSnapshot, SinkError, SinkMetrics};

/// Which process stream the sink targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

impl ConsoleStream {
    /// Lowercase name of the stream
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Console sink writing to stdout or stderr
pub struct ConsoleSink {
    /// Target stream, kept for diagnostics
    stream: ConsoleStream,

    /// Buffered writer; `None` once closed
    writer: Mutex<Option<BufWriter<Box<dyn Write + Send>>>>,

    /// Metrics (Arc for sharing with metrics handle)
    metrics: Arc<SinkMetrics>,
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("stream", &self.stream)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl ConsoleSink {
    /// Create a sink writing to stdout
    pub fn stdout(buffer_size: usize) -> Self {
        Self::wrap(ConsoleStream::Stdout, Box::new(io::stdout()), buffer_size)
    }

    /// Create a sink writing to stderr
    pub fn stderr(buffer_size: usize) -> Self {
        Self::wrap(ConsoleStream::Stderr, Box::new(io::stderr()), buffer_size)
    }

    /// Create a sink over an arbitrary writer
    ///
    /// Used by tests to capture output; production code should prefer
    /// [`ConsoleSink::stdout`] / [`ConsoleSink::stderr`].
    pub fn wrap(
        stream: ConsoleStream,
        writer: Box<dyn Write + Send>,
        buffer_size: usize,
    ) -> Self {
        Self {
            stream,
            writer: Mutex::new(Some(BufWriter::with_capacity(buffer_size.max(1), writer))),
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    /// Write one record
    pub fn write(&self, payload: &[u8]) -> Result<usize, SinkError> {
        let mut guard = self.writer.lock();
        let writer = guard.as_mut().ok_or(SinkError::Closed)?;

        match writer.write_all(payload) {
            Ok(()) => {
                self.metrics.record_written(payload.len() as u64);
                Ok(payload.len())
            }
            Err(e) => {
                self.metrics.record_write_error();
                Err(e.into())
            }
        }
    }

    /// Flush buffered bytes to the stream
    pub fn flush(&self) -> Result<(), SinkError> {
        let mut guard = self.writer.lock();
        let writer = guard.as_mut().ok_or(SinkError::Closed)?;

        match writer.flush() {
            Ok(()) => {
                self.metrics.record_flush();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_flush_error();
                Err(e.into())
            }
        }
    }

    /// Flush and release the stream
    ///
    /// The underlying stream is not closed - it is the process's stdout or
    /// stderr. Idempotent: later calls return `Ok(())`.
    pub fn close(&self) -> Result<(), SinkError> {
        let writer = self.writer.lock().take();
        let Some(mut writer) = writer else {
            return Ok(());
        };

        match writer.flush() {
            Ok(()) => {
                self.metrics.record_flush();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_flush_error();
                Err(e.into())
            }
        }
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.writer.lock().is_none()
    }

    /// Target stream
    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }

    /// Get reference to metrics
    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Get snapshot of metrics
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;
