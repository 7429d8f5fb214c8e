//! Tests for the plain file sink

use crate::common::SinkError;
use crate::file::FileSink;
use tempfile::TempDir;

#[test]
fn test_open_write_close_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.log");

    let sink = FileSink::open(&path, 4096).unwrap();
    sink.write(b"entry one\n").unwrap();
    sink.write(b"entry two\n").unwrap();
    sink.close().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "entry one\nentry two\n");
}

#[test]
fn test_open_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no/such/dir/audit.log");

    let err = FileSink::open(&path, 4096).unwrap_err();
    assert!(matches!(err, SinkError::Io(_)));
}

#[test]
fn test_open_zero_buffer_size_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.log");

    let err = FileSink::open(&path, 0).unwrap_err();
    assert!(matches!(err, SinkError::Config(_)));
}

#[test]
fn test_writes_buffered_until_flush() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.log");

    let sink = FileSink::open(&path, 4096).unwrap();
    sink.write(b"buffered\n").unwrap();

    // Still in the BufWriter
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

    sink.flush().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "buffered\n");

    sink.close().unwrap();
}

#[test]
fn test_write_after_close_fails() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::open(dir.path().join("audit.log"), 4096).unwrap();

    sink.close().unwrap();
    assert!(sink.is_closed());

    assert!(matches!(sink.write(b"x"), Err(SinkError::Closed)));
    assert!(matches!(sink.flush(), Err(SinkError::Closed)));
}

#[test]
fn test_close_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::open(dir.path().join("audit.log"), 4096).unwrap();

    sink.write(b"once\n").unwrap();
    sink.close().unwrap();
    sink.close().unwrap();

    let content = std::fs::read_to_string(dir.path().join("audit.log")).unwrap();
    assert_eq!(content, "once\n");
}

#[test]
fn test_append_mode_preserves_existing_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.log");
    std::fs::write(&path, "previous run\n").unwrap();

    let sink = FileSink::open(&path, 4096).unwrap();
    sink.write(b"this run\n").unwrap();
    sink.close().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "previous run\nthis run\n");
}

#[test]
fn test_metrics_track_writes() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::open(dir.path().join("audit.log"), 4096).unwrap();

    sink.write(b"12345").unwrap();
    sink.write(b"678").unwrap();
    sink.close().unwrap();

    let snapshot = sink.metrics_snapshot();
    assert_eq!(snapshot.records_written, 2);
    assert_eq!(snapshot.bytes_written, 8);
    assert!(snapshot.flush_count >= 1);
}
