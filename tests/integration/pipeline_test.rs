//! Full segmentation runs against a real temp directory

use std::fs;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use logseg::{run, ChunkWriter, ConfigError, OrphanPolicy, RunConfig, RunError, Runner};
use tempfile::TempDir;

use crate::helpers::{file_names, read_chunks, temp_fixture, write_log};

const JAVA: &str = r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}";

#[test]
fn java_fixture_is_split_into_entry_aligned_chunks() {
    let (temp, input) = temp_fixture("java_app.log");
    let out = temp.path().join("out");
    let config = RunConfig::new(&input, &out, "java", JAVA).max_entries(3);

    let summary = run(&config).unwrap();

    let dir = out.join("java").join("java_app");
    assert_eq!(summary.chunk_dir, dir);
    assert_eq!(summary.chunk_count(), 3);
    assert_eq!(summary.stats.entries, 8);
    assert_eq!(summary.stats.orphans_dropped, 2);
    assert_eq!(
        file_names(&dir),
        vec!["chunk_0000.log", "chunk_0001.log", "chunk_0002.log"]
    );

    let original = fs::read(&input).unwrap();
    let banner_end = original.windows(10).position(|w| w == b"2024-03-01").unwrap();
    assert_eq!(read_chunks(&dir).concat(), &original[banner_end..]);
    assert_eq!(summary.bytes_written as usize, original.len() - banner_end);
}

#[test]
fn preamble_policy_keeps_every_byte() {
    let (temp, input) = temp_fixture("java_app.log");
    let out = temp.path().join("out");
    let config = RunConfig::new(&input, &out, "java", JAVA)
        .max_entries(4)
        .orphan_policy(OrphanPolicy::Preamble);

    let summary = run(&config).unwrap();

    assert_eq!(summary.chunk_count(), 3);
    let chunks = read_chunks(&summary.chunk_dir);
    assert!(chunks[0].starts_with(b"Starting service"));
    assert_eq!(chunks.concat(), fs::read(&input).unwrap());
}

#[test]
fn continuation_example_yields_single_chunk() {
    let temp = TempDir::new().unwrap();
    let input = write_log(temp.path(), "ex.log", b"A start\n  B continues\nC next\n");
    let config = RunConfig::new(&input, temp.path().join("out"), "p", "[AC]").max_entries(2);

    let summary = run(&config).unwrap();

    assert_eq!(summary.chunk_count(), 1);
    assert_eq!(
        fs::read(&summary.chunks[0]).unwrap(),
        b"A start\n  B continues\nC next\n"
    );
}

#[test]
fn three_entries_example_yields_two_chunks() {
    let temp = TempDir::new().unwrap();
    let input = write_log(temp.path(), "ex.log", b"E1\nE2\nE3\n");
    let config = RunConfig::new(&input, temp.path().join("out"), "p", "E").max_entries(2);

    let summary = run(&config).unwrap();

    assert_eq!(read_chunks(&summary.chunk_dir), vec![b"E1\nE2\n".to_vec(), b"E3\n".to_vec()]);
}

#[test]
fn rerun_is_idempotent_and_removes_stale_chunks() {
    let temp = TempDir::new().unwrap();
    let input = write_log(temp.path(), "app.log", b"E1\nE2\nE3\nE4\nE5\n");
    let out = temp.path().join("out");

    let first = run(&RunConfig::new(&input, &out, "p", "E").max_entries(1)).unwrap();
    assert_eq!(first.chunk_count(), 5);

    let second = run(&RunConfig::new(&input, &out, "p", "E").max_entries(2)).unwrap();
    assert_eq!(second.prepare.removed, 5);
    assert_eq!(
        file_names(&second.chunk_dir),
        vec!["chunk_0000.log", "chunk_0001.log", "chunk_0002.log"]
    );
    let after_second = read_chunks(&second.chunk_dir);

    let third = run(&RunConfig::new(&input, &out, "p", "E").max_entries(2)).unwrap();
    assert_eq!(read_chunks(&third.chunk_dir), after_second);
}

#[test]
fn non_chunk_files_survive_rerun() {
    let temp = TempDir::new().unwrap();
    let input = write_log(temp.path(), "app.log", b"E1\n");
    let config = RunConfig::new(&input, temp.path().join("out"), "p", "E");
    let dir = config.chunk_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("chunk_0000.json"), "{}").unwrap();

    run(&config).unwrap();

    assert_eq!(file_names(&dir), vec!["chunk_0000.json", "chunk_0000.log"]);
}

#[test]
fn invalid_bytes_are_copied_verbatim() {
    let temp = TempDir::new().unwrap();
    let content: &[u8] = b"E1 \xff\xfe bad\n\x80 cont\r\nE2 \xc3\x28\n";
    let input = write_log(temp.path(), "bin.log", content);
    let config = RunConfig::new(&input, temp.path().join("out"), "p", "E").max_entries(1);

    let summary = run(&config).unwrap();

    assert_eq!(summary.chunk_count(), 2);
    assert_eq!(read_chunks(&summary.chunk_dir).concat(), content);
}

#[test]
fn empty_input_creates_no_chunks() {
    let temp = TempDir::new().unwrap();
    let input = write_log(temp.path(), "empty.log", b"");
    let config = RunConfig::new(&input, temp.path().join("out"), "p", "E");

    let summary = run(&config).unwrap();

    assert_eq!(summary.chunk_count(), 0);
    assert!(summary.chunk_dir.is_dir());
    assert!(file_names(&summary.chunk_dir).is_empty());
}

#[test]
fn invalid_regex_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let input = write_log(temp.path(), "app.log", b"E1\n");
    let out = temp.path().join("out");
    let config = RunConfig::new(&input, &out, "broken", "(unclosed");

    let err = run(&config).unwrap_err();

    assert!(matches!(
        &err,
        RunError::Config(ConfigError::InvalidPattern { pattern, .. }) if pattern == "(unclosed"
    ));
    assert!(err.to_string().contains("(unclosed"));
    assert!(!out.exists());
}

#[test]
fn missing_input_is_reported_before_output_is_touched() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let config = RunConfig::new(temp.path().join("nope.log"), &out, "p", "E");

    let err = run(&config).unwrap_err();

    assert!(matches!(err, RunError::InputNotFound { .. }));
    assert!(err.to_string().contains("nope.log"));
    assert!(!out.exists());
}

#[test]
fn directory_input_runs_each_log_file() {
    let temp = TempDir::new().unwrap();
    let logs = temp.path().join("logs");
    fs::create_dir(&logs).unwrap();
    write_log(&logs, "b.log", b"E1\nE2\nE3\n");
    write_log(&logs, "a.log", b"E1\n");
    write_log(&logs, "notes.txt", b"E1\n");
    let out = temp.path().join("out");
    let config = RunConfig::new(&logs, &out, "p", "E").max_entries(2);

    let summaries = Runner::new(ChunkWriter::fs()).run_path(&config).unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].chunk_dir, out.join("p").join("a"));
    assert_eq!(summaries[0].chunk_count(), 1);
    assert_eq!(summaries[1].chunk_dir, out.join("p").join("b"));
    assert_eq!(summaries[1].chunk_count(), 2);
    assert!(!out.join("p").join("notes").exists());
}

#[test]
fn cancelled_run_reports_progress() {
    let temp = TempDir::new().unwrap();
    let input = write_log(temp.path(), "app.log", b"E1\nE2\n");
    let config = RunConfig::new(&input, temp.path().join("out"), "p", "E");

    let mut runner = Runner::new(ChunkWriter::fs()).with_cancel(Arc::new(AtomicBool::new(true)));
    let err = runner.run(&config).unwrap_err();

    assert!(matches!(err, RunError::Cancelled { line: 0, chunks_written: 0 }));
    assert!(file_names(&config.chunk_dir()).is_empty());
}
