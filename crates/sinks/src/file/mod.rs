//! Plain file sink
//!
//! Writes records straight through a `BufWriter` on the caller's thread.
//! Suitable for low-volume destinations (audit trails, crash logs) where
//! the caller can afford the disk latency; high-volume logging should use
//! the buffered sink instead.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::{MetricsSnapshot, ShutdownErrors, SinkError, SinkMetrics};

/// Plain file sink
///
/// The writer sits behind a mutex so concurrent callers serialize at the
/// write call; each record is written whole, never interleaved.
#[derive(Debug)]
pub struct FileSink {
    /// Destination path, kept for diagnostics
    path: PathBuf,

    /// Buffered writer; `None` once closed
    writer: Mutex<Option<BufWriter<File>>>,

    /// Metrics (Arc for sharing with metrics handle)
    metrics: Arc<SinkMetrics>,
}

impl FileSink {
    /// Open the destination file in append mode
    ///
    /// Fails synchronously if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>, buffer_size: usize) -> Result<Self, SinkError> {
        if buffer_size == 0 {
            return Err(SinkError::config("buffer_size must be greater than zero"));
        }

        let path = path.into();
        let file = File::options().create(true).append(true).open(&path)?;

        tracing::debug!(path = %path.display(), "file sink opened");

        Ok(Self {
            path,
            writer: Mutex::new(Some(BufWriter::with_capacity(buffer_size, file))),
            metrics: Arc::new(SinkMetrics::new()),
        })
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

    /// Flush buffered bytes to the file
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

    /// Flush, sync, and close the file
    ///
    /// Idempotent: later calls return `Ok(())`. Flush and close are both
    /// attempted; both errors are reported if both fail.
    pub fn close(&self) -> Result<(), SinkError> {
        let writer = self.writer.lock().take();
        let Some(mut writer) = writer else {
            return Ok(());
        };

        let mut errors = ShutdownErrors::default();

        match writer.flush() {
            Ok(()) => self.metrics.record_flush(),
            Err(e) => {
                self.metrics.record_flush_error();
                errors.flush = Some(e);
            }
        }

        match writer.into_inner() {
            Ok(file) => {
                if let Err(e) = file.sync_all() {
                    errors.close = Some(e);
                }
            }
            Err(e) => {
                errors.close = Some(e.into_error());
            }
        }

        errors.into_result()
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.writer.lock().is_none()
    }

    /// Get reference to metrics
    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Get snapshot of metrics
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;
