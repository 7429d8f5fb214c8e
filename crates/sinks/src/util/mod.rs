//! Shared utilities for sinks

mod rate_limited;

pub use rate_limited::{RateLimitedLogger, DEFAULT_LOG_INTERVAL};
