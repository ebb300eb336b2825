//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use logseg::{BoundaryPattern, LineGroup, OrphanPolicy, Segmenter};

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Pattern matching the timestamp prefix used in `java_app.log`
pub const JAVA_PATTERN: &str = r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}";

/// Segment `input` completely, panicking on any scan error
pub fn segment_all(input: &str, pattern: &str, max: usize, policy: OrphanPolicy) -> Vec<LineGroup> {
    let pattern = BoundaryPattern::new(pattern).expect("valid test pattern");
    Segmenter::new(input.as_bytes(), pattern, max)
        .orphan_policy(policy)
        .collect::<Result<Vec<_>, _>>()
        .expect("in-memory reads cannot fail")
}

/// Render each group as a string for readable assertions
pub fn group_texts(groups: &[LineGroup]) -> Vec<String> {
    groups
        .iter()
        .map(|g| String::from_utf8(g.to_bytes()).expect("test input is UTF-8"))
        .collect()
}
