//! Log segmentation.
//!
//! Splits a log stream into groups of whole entries. A line that matches the
//! [`BoundaryPattern`] starts an entry; every other line is a continuation of
//! the entry before it (stack frames, wrapped messages). Groups hold at most
//! `max_entries` entries and are produced lazily by [`Segmenter`].

mod group;
mod pattern;
mod scanner;

pub use group::LineGroup;
pub use pattern::BoundaryPattern;
pub use scanner::{SegmentStats, Segmenter};

use serde::{Deserialize, Serialize};

/// What to do with lines that appear before the first entry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Discard them.
    #[default]
    Drop,
    /// Emit them as a separate group ahead of the first entry.
    Preamble,
}

impl std::fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrphanPolicy::Drop => write!(f, "drop"),
            OrphanPolicy::Preamble => write!(f, "preamble"),
        }
    }
}

/// Errors raised while reading the input.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Cancelled after line {line}")]
    Cancelled { line: usize },
}
