//! Rate-limited error logging utility
//!
//! Prevents diagnostic spam under sustained error conditions (a full disk
//! makes every flush fail) by limiting log frequency. Logs at most once per
//! interval, with a count of suppressed errors in between.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default interval for rate-limited logging
pub const DEFAULT_LOG_INTERVAL: Duration = Duration::from_secs(10);

/// Rate-limited logger for background-task errors
///
/// Thread-safe: uses atomic counters and a mutex for the last log time.
#[derive(Debug)]
pub struct RateLimitedLogger {
    /// Minimum interval between log messages
    min_interval: Duration,

    /// Last time we logged
    last_log_time: Mutex<Option<Instant>>,

    /// Count of errors since last log
    error_count: AtomicU64,

    /// Total errors ever recorded
    total_errors: AtomicU64,
}

impl RateLimitedLogger {
    /// Create a new rate-limited logger with the specified interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_log_time: Mutex::new(None),
            error_count: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
        }
    }

    /// Record an error and log if enough time has passed
    ///
    /// Returns true if the error was logged, false if it was suppressed.
    pub fn error(&self, message: &str, error: &dyn std::fmt::Display) -> bool {
        self.error_count.fetch_add(1, Ordering::Relaxed);
        self.total_errors.fetch_add(1, Ordering::Relaxed);

        let should_log = {
            let mut last_time = self.last_log_time.lock();
            let now = Instant::now();

            match *last_time {
                None => {
                    *last_time = Some(now);
                    true
                }
                Some(last) if now.duration_since(last) >= self.min_interval => {
                    *last_time = Some(now);
                    true
                }
                _ => false,
            }
        };

        if should_log {
            let count = self.error_count.swap(0, Ordering::Relaxed);
            let total = self.total_errors.load(Ordering::Relaxed);

            if count > 1 {
                tracing::error!(
                    message = %message,
                    error = %error,
                    suppressed_count = count - 1,
                    total_errors = total,
                    "error (rate-limited)"
                );
            } else {
                tracing::error!(
                    message = %message,
                    error = %error,
                    total_errors = total,
                    "error"
                );
            }
            true
        } else {
            false
        }
    }

    /// Get the current error count since last log
    pub fn pending_error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Get the total error count
    pub fn total_error_count(&self) -> u64 {
        self.total_errors.load(Ordering::Relaxed)
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.error_count.store(0, Ordering::Relaxed);
        self.total_errors.store(0, Ordering::Relaxed);
        *self.last_log_time.lock() = None;
    }
}

impl Default for RateLimitedLogger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_INTERVAL)
    }
}
