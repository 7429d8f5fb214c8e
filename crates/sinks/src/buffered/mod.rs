//! Buffered file sink - non-blocking log persistence
//!
//! Decouples log-emitting call sites from disk latency: `write` places the
//! payload on a bounded queue and returns; a dedicated worker task owns the
//! output buffer and the file, appending queued records and flushing on a
//! periodic ticker.
//!
//! ```text
//! [callers] --Bytes--> [bounded queue] --> [worker task] --> [BufWriter<File>]
//!                                               |
//!                                        flush ticker (1s)
//! ```
//!
//! # Guarantees
//!
//! - Records are appended in enqueue order; payload bytes are never split or
//!   interleaved.
//! - A full queue applies backpressure: `write` waits for a slot,
//!   `try_write` returns [`SinkError::QueueFull`]. Nothing is dropped.
//! - `close` drains records still on the queue, flushes, syncs, and closes
//!   the file exactly once. Flush and close are both attempted and both
//!   errors reported if both fail.
//! - Append and periodic-flush errors never reach `write` callers; they are
//!   counted in [`SinkMetrics`] and surfaced through rate-limited tracing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::common::{MetricsSnapshot, ShutdownErrors, SinkError, SinkMetrics};
use crate::util::RateLimitedLogger;

/// Default pending-queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Default output buffer size (32 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;

/// Default periodic flush interval
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for the buffered file sink
#[derive(Debug, Clone)]
pub struct BufferedFileConfig {
    /// Destination file path
    pub path: PathBuf,

    /// Pending-queue capacity in records
    pub queue_capacity: usize,

    /// Output buffer size in bytes
    pub buffer_size: usize,

    /// Periodic flush interval
    pub flush_interval: Duration,
}

impl BufferedFileConfig {
    /// Create a config for the given path with default sizing
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            buffer_size: DEFAULT_BUFFER_SIZE,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }

    /// Set the pending-queue capacity
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the output buffer size
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the periodic flush interval
    #[must_use]
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }
}

/// Handle for accessing buffered sink metrics
///
/// Holds an Arc to the metrics, so it remains valid after the sink is
/// closed and the worker has exited.
#[derive(Clone)]
pub struct BufferedFileSinkMetricsHandle {
    metrics: Arc<SinkMetrics>,
}

impl BufferedFileSinkMetricsHandle {
    /// Get snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Non-blocking buffered file sink
///
/// Cheap to share behind an `Arc`; all methods take `&self`. The worker
/// task is the only owner of the output buffer and file handle, so no
/// locking happens on the write path beyond the queue itself.
#[derive(Debug)]
pub struct BufferedFileSink {
    /// Queue sender; the worker holds the receiver
    sender: mpsc::Sender<Bytes>,

    /// Cooperative shutdown signal for the worker
    cancel: CancellationToken,

    /// Worker join handle, taken by the first `close` call
    worker: Mutex<Option<JoinHandle<ShutdownErrors>>>,

    /// Set once `close` has been observed
    closed: AtomicBool,

    /// Metrics (Arc for sharing with the worker and metrics handle)
    metrics: Arc<SinkMetrics>,

    /// Destination path, kept for diagnostics
    path: PathBuf,
}

impl BufferedFileSink {
    /// Open the destination file and start the background worker
    ///
    /// Must be called within a Tokio runtime. Fails synchronously if the
    /// configuration is invalid or the file cannot be opened; no worker is
    /// started in that case.
    pub fn open(config: BufferedFileConfig) -> Result<Self, SinkError> {
        if config.queue_capacity == 0 {
            return Err(SinkError::config("queue_capacity must be greater than zero"));
        }
        if config.buffer_size == 0 {
            return Err(SinkError::config("buffer_size must be greater than zero"));
        }

        let file = File::options()
            .create(true)
            .append(true)
            .open(&config.path)?;

        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        let cancel = CancellationToken::new();
        let metrics = Arc::new(SinkMetrics::new());

        let task = WriterTask {
            receiver,
            writer: BufWriter::with_capacity(config.buffer_size, file),
            flush_interval: config.flush_interval,
            cancel: cancel.clone(),
            metrics: Arc::clone(&metrics),
            errors: RateLimitedLogger::default(),
            path: config.path.clone(),
        };
        let worker = tokio::spawn(task.run());

        tracing::debug!(
            path = %config.path.display(),
            queue_capacity = config.queue_capacity,
            buffer_size = config.buffer_size,
            "buffered file sink opened"
        );

        Ok(Self {
            sender,
            cancel,
            worker: Mutex::new(Some(worker)),
            closed: AtomicBool::new(false),
            metrics,
            path: config.path,
        })
    }

    /// Enqueue a payload, waiting while the queue is full
    ///
    /// Returns the payload length once the record is accepted. Acceptance
    /// means the record will be appended to the output buffer in enqueue
    /// order; it reaches stable storage on the next flush. Never performs
    /// disk I/O on the caller's path.
    pub async fn write(&self, payload: impl Into<Bytes>) -> Result<usize, SinkError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(SinkError::Closed);
        }

        let payload: Bytes = payload.into();
        let len = payload.len();

        self.sender
            .send(payload)
            .await
            .map_err(|_| SinkError::Closed)?;

        self.metrics.record_enqueued();
        Ok(len)
    }

    /// Enqueue a payload without waiting
    ///
    /// Returns [`SinkError::QueueFull`] when the queue is at capacity.
    pub fn try_write(&self, payload: impl Into<Bytes>) -> Result<usize, SinkError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(SinkError::Closed);
        }

        let payload: Bytes = payload.into();
        let len = payload.len();

        match self.sender.try_send(payload) {
            Ok(()) => {
                self.metrics.record_enqueued();
                Ok(len)
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.metrics.record_queue_full();
                Err(SinkError::QueueFull)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SinkError::Closed),
        }
    }

    /// Stop the worker, drain the queue, flush, and close the file
    ///
    /// Records already on the queue when shutdown is observed are appended
    /// before the final flush. Idempotent: only the first call performs the
    /// shutdown and receives its errors; later calls return `Ok(())`.
    pub async fn close(&self) -> Result<(), SinkError> {
        self.closed.store(true, Ordering::Release);

        let worker = self.worker.lock().take();
        let Some(worker) = worker else {
            return Ok(());
        };

        self.cancel.cancel();

        match worker.await {
            Ok(errors) => errors.into_result(),
            Err(e) => Err(SinkError::worker(e.to_string())),
        }
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Get reference to metrics
    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Get a metrics handle that survives `close`
    pub fn metrics_handle(&self) -> BufferedFileSinkMetricsHandle {
        BufferedFileSinkMetricsHandle {
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Background worker owning the output buffer and file
///
/// Sole writer: no locking is needed on the buffer or file handle.
struct WriterTask {
    receiver: mpsc::Receiver<Bytes>,
    writer: BufWriter<File>,
    flush_interval: Duration,
    cancel: CancellationToken,
    metrics: Arc<SinkMetrics>,
    errors: RateLimitedLogger,
    path: PathBuf,
}

impl WriterTask {
    /// Multiplex queue arrivals, the flush ticker, and shutdown
    async fn run(mut self) -> ShutdownErrors {
        let mut flush_ticker = tokio::time::interval(self.flush_interval);
        flush_ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                payload = self.receiver.recv() => {
                    match payload {
                        Some(payload) => self.append(&payload),
                        // All senders dropped - treat as shutdown
                        None => break,
                    }
                }
                _ = flush_ticker.tick() => {
                    self.flush_periodic();
                }
                _ = self.cancel.cancelled() => {
                    break;
                }
            }
        }

        // Records already accepted onto the queue are appended before the
        // final flush.
        while let Ok(payload) = self.receiver.try_recv() {
            self.append(&payload);
        }

        self.finish()
    }

    /// Append one record to the output buffer (no flush)
    fn append(&mut self, payload: &[u8]) {
        match self.writer.write_all(payload) {
            Ok(()) => self.metrics.record_written(payload.len() as u64),
            Err(e) => {
                self.metrics.record_write_error();
                self.errors.error("append to output buffer failed", &e);
            }
        }
    }

    /// Periodic flush; failures are counted and rate-limit logged, never
    /// propagated to writers
    fn flush_periodic(&mut self) {
        match self.writer.flush() {
            Ok(()) => self.metrics.record_flush(),
            Err(e) => {
                self.metrics.record_flush_error();
                self.errors.error("periodic flush failed", &e);
            }
        }
    }

    /// Final flush, sync, and close; both steps attempted, both errors kept
    fn finish(mut self) -> ShutdownErrors {
        let mut errors = ShutdownErrors::default();

        match self.writer.flush() {
            Ok(()) => self.metrics.record_flush(),
            Err(e) => {
                self.metrics.record_flush_error();
                errors.flush = Some(e);
            }
        }

        match self.writer.into_inner() {
            Ok(file) => {
                if let Err(e) = file.sync_all() {
                    errors.close = Some(e);
                }
                // File handle drops here - closed exactly once
            }
            Err(e) => {
                errors.close = Some(e.into_error());
            }
        }

        let snapshot = self.metrics.snapshot();
        tracing::debug!(
            path = %self.path.display(),
            records = snapshot.records_written,
            bytes = snapshot.bytes_written,
            write_errors = snapshot.write_errors,
            flush_errors = snapshot.flush_errors,
            "buffered file sink worker stopped"
        );

        errors
    }
}
