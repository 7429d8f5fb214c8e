//! Unified sink handle
//!
//! Wraps the concrete sink types behind one enum so consumers (the logger)
//! stay agnostic of the destination. Construction from a [`SinkConfig`]
//! mirrors the configuration's `type` tag.

use bytes::Bytes;

use quill_config::SinkConfig;

use crate::buffered::{BufferedFileConfig, BufferedFileSink};
use crate::common::SinkError;
use crate::console::ConsoleSink;
use crate::file::FileSink;

/// A configured log destination
#[derive(Debug)]
pub enum Sink {
    /// stdout/stderr
    Console(ConsoleSink),

    /// Plain file, written on the caller's thread
    File(FileSink),

    /// Non-blocking buffered file
    Buffered(BufferedFileSink),
}

impl Sink {
    /// Build a sink from its configuration
    ///
    /// `name` is the configured sink name, used in error messages.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if a file-backed sink has no path,
    /// or with an I/O error if the destination cannot be opened. On failure
    /// nothing is left running.
    pub fn open(name: &str, config: &SinkConfig) -> Result<Self, SinkError> {
        match config {
            SinkConfig::Stdout(console) => {
                Ok(Self::Console(ConsoleSink::stdout(console.buffer_size)))
            }
            SinkConfig::Stderr(console) => {
                Ok(Self::Console(ConsoleSink::stderr(console.buffer_size)))
            }
            SinkConfig::File(file) => {
                if file.path.is_empty() {
                    return Err(SinkError::config(format!(
                        "sink '{name}' requires a destination path"
                    )));
                }
                FileSink::open(&file.path, file.buffer_size).map(Self::File)
            }
            SinkConfig::BufferedFile(buffered) => {
                if buffered.path.is_empty() {
                    return Err(SinkError::config(format!(
                        "sink '{name}' requires a destination path"
                    )));
                }
                let config = BufferedFileConfig::new(&buffered.path)
                    .with_queue_capacity(buffered.queue_capacity)
                    .with_buffer_size(buffered.buffer_size)
                    .with_flush_interval(buffered.flush_interval);
                BufferedFileSink::open(config).map(Self::Buffered)
            }
        }
    }

    /// Write one record, waiting on backpressure for the buffered sink
    pub async fn write(&self, payload: impl Into<Bytes>) -> Result<usize, SinkError> {
        match self {
            Self::Console(sink) => sink.write(&payload.into()),
            Self::File(sink) => sink.write(&payload.into()),
            Self::Buffered(sink) => sink.write(payload).await,
        }
    }

    /// Write one record without waiting
    ///
    /// For the buffered sink this returns [`SinkError::QueueFull`] instead
    /// of waiting; console and file sinks write synchronously either way.
    pub fn try_write(&self, payload: impl Into<Bytes>) -> Result<usize, SinkError> {
        match self {
            Self::Console(sink) => sink.write(&payload.into()),
            Self::File(sink) => sink.write(&payload.into()),
            Self::Buffered(sink) => sink.try_write(payload),
        }
    }

    /// Flush buffered output
    ///
    /// The buffered sink flushes on its own ticker; an explicit flush is a
    /// no-op for it.
    pub fn flush(&self) -> Result<(), SinkError> {
        match self {
            Self::Console(sink) => sink.flush(),
            Self::File(sink) => sink.flush(),
            Self::Buffered(_) => Ok(()),
        }
    }

    /// Close the sink, flushing outstanding data
    pub async fn close(&self) -> Result<(), SinkError> {
        match self {
            Self::Console(sink) => sink.close(),
            Self::File(sink) => sink.close(),
            Self::Buffered(sink) => sink.close().await,
        }
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Console(sink) => sink.is_closed(),
            Self::File(sink) => sink.is_closed(),
            Self::Buffered(sink) => sink.is_closed(),
        }
    }

    /// Sink type name, matching the configuration tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Console(sink) => sink.stream().as_str(),
            Self::File(_) => "file",
            Self::Buffered(_) => "buffered_file",
        }
    }
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod sink_test;
