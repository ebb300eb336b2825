//! Chunk writer: directory preparation and numbered chunk output.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::naming::{chunk_file_name, is_chunk_file_name};
use super::store::{ChunkStore, FsStore};
use crate::segment::LineGroup;

/// Errors from preparing the output directory or writing a chunk.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to prepare output directory {}: {source}", path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write chunk file {}: {source}", path.display())]
    Chunk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of [`ChunkWriter::prepare_output_dir`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareReport {
    /// The directory did not exist and was created.
    pub created: bool,
    /// Stale chunk files removed.
    pub removed: usize,
    /// Stale chunk files that could not be removed.
    pub failed: usize,
}

/// Persists line groups as `chunk_NNNN.log` files.
#[derive(Debug, Default)]
pub struct ChunkWriter<S = FsStore> {
    store: S,
}

impl ChunkWriter<FsStore> {
    /// Writer backed by the real filesystem.
    pub fn fs() -> Self {
        Self::new(FsStore)
    }
}

impl<S: ChunkStore> ChunkWriter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Create `dir` if needed and clear chunk files left by an earlier run.
    ///
    /// Files that do not follow the chunk naming convention are left alone.
    /// A stale chunk that cannot be removed is logged and skipped.
    pub fn prepare_output_dir(&mut self, dir: &Path) -> Result<PrepareReport, WriteError> {
        let prepare_err = |source| WriteError::Prepare {
            path: dir.to_path_buf(),
            source,
        };

        let mut report = PrepareReport {
            created: self.store.ensure_dir(dir).map_err(prepare_err)?,
            ..PrepareReport::default()
        };
        if report.created {
            debug!(dir = %dir.display(), "created output directory");
            return Ok(report);
        }

        let names = self.store.list_file_names(dir).map_err(prepare_err)?;
        for name in names.iter().filter(|name| is_chunk_file_name(name)) {
            let path = dir.join(name);
            match self.store.remove_file(&path) {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not remove stale chunk");
                    report.failed += 1;
                }
            }
        }
        debug!(
            dir = %dir.display(),
            removed = report.removed,
            failed = report.failed,
            "cleared stale chunks"
        );
        Ok(report)
    }

    /// Write `group` verbatim to `dir/chunk_{index:04}.log`.
    pub fn write_chunk(
        &mut self,
        dir: &Path,
        index: usize,
        group: &LineGroup,
    ) -> Result<PathBuf, WriteError> {
        let path = dir.join(chunk_file_name(index));
        self.store
            .write_file(&path, group)
            .map_err(|source| WriteError::Chunk {
                path: path.clone(),
                source,
            })?;
        debug!(
            path = %path.display(),
            lines = group.line_count(),
            entries = group.entry_count(),
            "wrote chunk"
        );
        Ok(path)
    }
}
