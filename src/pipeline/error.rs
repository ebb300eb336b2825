//! Run-level errors.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Fatal errors for a segmentation run.
///
/// Chunks written before the failure stay on disk; `chunks_written` says how
/// many.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Input log file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to open input log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to prepare output directory {}: {source}", path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Failed to read {} at line {line} ({chunks_written} chunks already written): {source}",
        path.display()
    )]
    Read {
        path: PathBuf,
        line: usize,
        chunks_written: usize,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Failed to write chunk {} ({chunks_written} chunks already written): {source}",
        path.display()
    )]
    Write {
        path: PathBuf,
        chunks_written: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Cancelled after line {line} ({chunks_written} chunks written)")]
    Cancelled { line: usize, chunks_written: usize },

    #[error("Failed to list log files in {}: {source}", path.display())]
    Discover {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// Chunks that were flushed before the run failed.
    pub fn chunks_written(&self) -> usize {
        match self {
            RunError::Read { chunks_written, .. }
            | RunError::Write { chunks_written, .. }
            | RunError::Cancelled { chunks_written, .. } => *chunks_written,
            _ => 0,
        }
    }
}
