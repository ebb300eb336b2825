//! Unit tests for the chunk writer on a real filesystem

use std::fs;

use logseg::{ChunkWriter, OrphanPolicy};
use tempfile::TempDir;

use crate::helpers::segment_all;

#[test]
fn prepare_creates_nested_output_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("out").join("java").join("app");

    let mut writer = ChunkWriter::fs();
    let report = writer.prepare_output_dir(&dir).unwrap();

    assert!(report.created);
    assert!(dir.is_dir());
}

#[test]
fn prepare_clears_stale_chunks_and_keeps_other_files() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    fs::write(dir.join("chunk_0000.log"), "stale").unwrap();
    fs::write(dir.join("chunk_0007.log"), "stale").unwrap();
    fs::write(dir.join("summary.json"), "{}").unwrap();
    fs::create_dir(dir.join("chunk_0001.log")).unwrap();

    let mut writer = ChunkWriter::fs();
    let report = writer.prepare_output_dir(dir).unwrap();

    assert!(!report.created);
    assert_eq!(report.removed, 2);
    assert_eq!(report.failed, 0);
    assert!(!dir.join("chunk_0000.log").exists());
    assert!(!dir.join("chunk_0007.log").exists());
    assert!(dir.join("summary.json").exists());
    assert!(dir.join("chunk_0001.log").is_dir());
}

#[test]
fn write_chunk_preserves_bytes() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("chunks");
    let input = "E1 caf\u{e9}\r\n\ttrace\r\nE2 end";
    let groups = segment_all(input, "E", 1, OrphanPolicy::Drop);

    let mut writer = ChunkWriter::fs();
    writer.prepare_output_dir(&dir).unwrap();
    let first = writer.write_chunk(&dir, 0, &groups[0]).unwrap();
    let second = writer.write_chunk(&dir, 1, &groups[1]).unwrap();

    assert_eq!(first, dir.join("chunk_0000.log"));
    assert_eq!(fs::read(&first).unwrap(), "E1 caf\u{e9}\r\n\ttrace\r\n".as_bytes());
    assert_eq!(fs::read(&second).unwrap(), b"E2 end");
}

#[test]
fn write_chunk_overwrites_existing_file() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    fs::write(dir.join("chunk_0000.log"), "a much longer previous chunk\n").unwrap();
    let groups = segment_all("E\n", "E", 1, OrphanPolicy::Drop);

    let mut writer = ChunkWriter::fs();
    writer.write_chunk(dir, 0, &groups[0]).unwrap();

    assert_eq!(fs::read(dir.join("chunk_0000.log")).unwrap(), b"E\n");
}

#[test]
fn write_chunk_into_missing_dir_fails() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("never-created");
    let groups = segment_all("E\n", "E", 1, OrphanPolicy::Drop);

    let err = ChunkWriter::fs().write_chunk(&dir, 3, &groups[0]).unwrap_err();
    assert!(err.to_string().contains("chunk_0003.log"));
}
