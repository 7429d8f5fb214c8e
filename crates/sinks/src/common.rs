//! Common types and utilities for sinks
//!
//! Shared functionality across all sink types.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Common sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Sink initialization failed
    #[error("failed to initialize sink: {0}")]
    Init(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The sink has been closed; no further writes are accepted
    #[error("writer closed")]
    Closed,

    /// Pending queue is at capacity (backpressure)
    #[error("write queue full")]
    QueueFull,

    /// Background writer task died unexpectedly
    #[error("writer task failed: {0}")]
    Worker(String),

    /// Errors collected while shutting the sink down
    #[error("shutdown failed: {0}")]
    Shutdown(ShutdownErrors),
}

impl SinkError {
    /// Create an initialization error
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a worker error
    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }
}

/// Errors collected during shutdown
///
/// The final flush and the file close are both attempted even if the first
/// fails, so a shutdown can report up to two distinct I/O errors.
#[derive(Debug, Default)]
pub struct ShutdownErrors {
    /// Error from the final flush, if any
    pub flush: Option<io::Error>,

    /// Error from closing the destination, if any
    pub close: Option<io::Error>,
}

impl ShutdownErrors {
    /// True when both flush and close succeeded
    pub fn is_empty(&self) -> bool {
        self.flush.is_none() && self.close.is_none()
    }

    /// Convert into a `Result`, keeping both errors when present
    pub fn into_result(self) -> Result<(), SinkError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SinkError::Shutdown(self))
        }
    }
}

impl fmt::Display for ShutdownErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.flush, &self.close) {
            (Some(flush), Some(close)) => {
                write!(f, "flush failed: {flush}; close failed: {close}")
            }
            (Some(flush), None) => write!(f, "flush failed: {flush}"),
            (None, Some(close)) => write!(f, "close failed: {close}"),
            (None, None) => write!(f, "clean shutdown"),
        }
    }
}

/// Metrics shared by all sink types
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Records accepted onto the pending queue
    pub records_enqueued: AtomicU64,

    /// Records appended to the output buffer
    pub records_written: AtomicU64,

    /// Total payload bytes appended
    pub bytes_written: AtomicU64,

    /// Append errors encountered
    pub write_errors: AtomicU64,

    /// Flush operations performed
    pub flush_count: AtomicU64,

    /// Flush operations that failed
    pub flush_errors: AtomicU64,

    /// Non-waiting writes rejected because the queue was full
    pub queue_full: AtomicU64,
}

impl SinkMetrics {
    /// Create new metrics instance
    pub const fn new() -> Self {
        Self {
            records_enqueued: AtomicU64::new(0),
            records_written: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            flush_count: AtomicU64::new(0),
            flush_errors: AtomicU64::new(0),
            queue_full: AtomicU64::new(0),
        }
    }

    /// Record a payload accepted onto the queue
    #[inline]
    pub fn record_enqueued(&self) {
        self.records_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a payload appended to the output buffer
    #[inline]
    pub fn record_written(&self, bytes: u64) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record an append error
    #[inline]
    pub fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful flush
    #[inline]
    pub fn record_flush(&self) {
        self.flush_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed flush
    #[inline]
    pub fn record_flush_error(&self) {
        self.flush_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a queue-full rejection
    #[inline]
    pub fn record_queue_full(&self) {
        self.queue_full.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_enqueued: self.records_enqueued.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            flush_count: self.flush_count.load(Ordering::Relaxed),
            flush_errors: self.flush_errors.load(Ordering::Relaxed),
            queue_full: self.queue_full.load(Ordering::Relaxed),
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.records_enqueued.store(0, Ordering::Relaxed);
        self.records_written.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.write_errors.store(0, Ordering::Relaxed);
        self.flush_count.store(0, Ordering::Relaxed);
        self.flush_errors.store(0, Ordering::Relaxed);
        self.queue_full.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time snapshot of sink metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub records_enqueued: u64,
    pub records_written: u64,
    pub bytes_written: u64,
    pub write_errors: u64,
    pub flush_count: u64,
    pub flush_errors: u64,
    pub queue_full: u64,
}

#[cfg(test)]
#[path = "common_test.rs"]
mod common_test;
