//! Tests for the console sink

use crate::common::SinkError;
use crate::console::{ConsoleSink, ConsoleStream};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Test writer that exposes captured bytes through a shared handle
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> Vec<u8> {
        self.0.lock().clone()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture_sink(buffer_size: usize) -> (ConsoleSink, SharedBuf) {
    let buf = SharedBuf::default();
    let sink = ConsoleSink::wrap(ConsoleStream::Stdout, Box::new(buf.clone()), buffer_size);
    (sink, buf)
}

#[test]
fn test_stream_names() {
    assert_eq!(ConsoleStream::Stdout.as_str(), "stdout");
    assert_eq!(ConsoleStream::Stderr.as_str(), "stderr");
}

#[test]
fn test_constructors_target_streams() {
    let sink = ConsoleSink::stdout(1024);
    assert_eq!(sink.stream(), ConsoleStream::Stdout);

    let sink = ConsoleSink::stderr(1024);
    assert_eq!(sink.stream(), ConsoleStream::Stderr);
}

#[test]
fn test_writes_buffered_until_flush() {
    let (sink, buf) = capture_sink(1024);

    sink.write(b"hello\n").unwrap();
    assert!(buf.contents().is_empty());

    sink.flush().unwrap();
    assert_eq!(buf.contents(), b"hello\n");
}

#[test]
fn test_close_flushes_remaining_output() {
    let (sink, buf) = capture_sink(1024);

    sink.write(b"parting words\n").unwrap();
    sink.close().unwrap();

    assert_eq!(buf.contents(), b"parting words\n");
}

#[test]
fn test_write_after_close_fails() {
    let (sink, _buf) = capture_sink(1024);

    sink.close().unwrap();
    assert!(sink.is_closed());

    assert!(matches!(sink.write(b"x"), Err(SinkError::Closed)));
}

#[test]
fn test_close_is_idempotent() {
    let (sink, buf) = capture_sink(1024);

    sink.write(b"once\n").unwrap();
    sink.close().unwrap();
    sink.close().unwrap();

    assert_eq!(buf.contents(), b"once\n");
}

#[test]
fn test_metrics_track_writes() {
    let (sink, _buf) = capture_sink(1024);

    sink.write(b"12345").unwrap();
    sink.write(b"678").unwrap();
    sink.flush().unwrap();

    let snapshot = sink.metrics_snapshot();
    assert_eq!(snapshot.records_written, 2);
    assert_eq!(snapshot.bytes_written, 8);
    assert_eq!(snapshot.flush_count, 1);
}
