//! Segmentation runs.
//!
//! A run ties the pieces together for one input file:
//! 1. Compile the boundary pattern (fails before anything is written)
//! 2. Check the input exists
//! 3. Prepare `output_dir/profile/input_base_name`, clearing stale chunks
//! 4. Stream groups from the segmenter and write one chunk per group
//!
//! Any failure after step 3 leaves already written chunks in place.

mod discover;
mod error;

pub use discover::find_log_files;
pub use error::RunError;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use humansize::{format_size, BINARY};
use tracing::{info, warn};

use crate::chunk::{ChunkStore, ChunkWriter, FsStore, PrepareReport, WriteError};
use crate::config::{ConfigError, RunConfig};
use crate::segment::{BoundaryPattern, ScanError, SegmentStats, Segmenter};

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input_path: PathBuf,
    pub chunk_dir: PathBuf,
    /// Chunk files in index order
    pub chunks: Vec<PathBuf>,
    pub bytes_written: u64,
    pub stats: SegmentStats,
    pub prepare: PrepareReport,
}

impl RunSummary {
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Get human-readable size of the written chunks
    pub fn size_human(&self) -> String {
        format_size(self.bytes_written, BINARY)
    }

    /// One-line summary for display
    pub fn summary(&self) -> String {
        format!(
            "{}: {} chunks ({}, {} entries) -> {}",
            self.input_path.display(),
            self.chunk_count(),
            self.size_human(),
            self.stats.entries,
            self.chunk_dir.display()
        )
    }
}

/// Run segmentation for one file on the real filesystem.
pub fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    Runner::new(ChunkWriter::fs()).run(config)
}

/// Drives segmentation runs through a [`ChunkWriter`].
pub struct Runner<S = FsStore> {
    writer: ChunkWriter<S>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<S: ChunkStore> Runner<S> {
    pub fn new(writer: ChunkWriter<S>) -> Self {
        Self {
            writer,
            cancel: None,
        }
    }

    /// Abort runs once `flag` is set; checked between line reads.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn writer(&self) -> &ChunkWriter<S> {
        &self.writer
    }

    pub fn into_writer(self) -> ChunkWriter<S> {
        self.writer
    }

    /// Segment `config.input_path`, which must be a regular file.
    pub fn run(&mut self, config: &RunConfig) -> Result<RunSummary, RunError> {
        let pattern = compile(config)?;

        let input = &config.input_path;
        if !input.is_file() {
            return Err(RunError::InputNotFound {
                path: input.clone(),
            });
        }
        let file = File::open(input).map_err(|source| RunError::Open {
            path: input.clone(),
            source,
        })?;

        self.segment(config, pattern, BufReader::new(file))
    }

    /// Segment an already opened stream using the settings in `config`.
    ///
    /// `config.input_path` is only used to name the output directory.
    pub fn run_reader<R: BufRead>(
        &mut self,
        config: &RunConfig,
        reader: R,
    ) -> Result<RunSummary, RunError> {
        let pattern = compile(config)?;
        self.segment(config, pattern, reader)
    }

    /// Run every `.log` file in a directory, or the single input file.
    ///
    /// Files are processed one after another; the first failure stops the
    /// batch.
    pub fn run_path(&mut self, config: &RunConfig) -> Result<Vec<RunSummary>, RunError> {
        if !config.input_path.is_dir() {
            return self.run(config).map(|summary| vec![summary]);
        }

        let files = find_log_files(&config.input_path)?;
        if files.is_empty() {
            warn!(dir = %config.input_path.display(), "no .log files found");
        } else {
            info!(
                dir = %config.input_path.display(),
                files = files.len(),
                "found log files"
            );
        }
        self.run_many(config, &files)
    }

    /// Run each input sequentially with otherwise identical settings.
    pub fn run_many(
        &mut self,
        config: &RunConfig,
        inputs: &[PathBuf],
    ) -> Result<Vec<RunSummary>, RunError> {
        inputs
            .iter()
            .map(|input| self.run(&config.for_input(input)))
            .collect()
    }

    fn segment<R: BufRead>(
        &mut self,
        config: &RunConfig,
        pattern: BoundaryPattern,
        reader: R,
    ) -> Result<RunSummary, RunError> {
        let input = config.input_path.clone();
        let chunk_dir = config.chunk_dir();

        let prepare = self
            .writer
            .prepare_output_dir(&chunk_dir)
            .map_err(|e| write_error(e, 0))?;

        info!(
            input = %input.display(),
            profile = %config.profile_name,
            max_entries = config.max_entries_per_chunk,
            "segmenting"
        );

        let mut segmenter = Segmenter::new(reader, pattern, config.max_entries_per_chunk)
            .orphan_policy(config.orphan_policy);
        if let Some(flag) = &self.cancel {
            segmenter = segmenter.with_cancel(Arc::clone(flag));
        }

        let mut chunks = Vec::new();
        let mut bytes_written = 0u64;
        for group in segmenter.by_ref() {
            let group = group.map_err(|e| scan_error(e, &input, chunks.len()))?;
            let path = self
                .writer
                .write_chunk(&chunk_dir, chunks.len(), &group)
                .map_err(|e| write_error(e, chunks.len()))?;
            bytes_written += group.byte_len() as u64;
            chunks.push(path);
        }

        let stats = segmenter.stats();
        if chunks.is_empty() && stats.orphans_dropped > 0 {
            warn!(
                input = %input.display(),
                pattern = %config.boundary_pattern,
                dropped = stats.orphans_dropped,
                "boundary pattern never matched; all lines were dropped"
            );
        } else if stats.orphans_dropped > 0 {
            warn!(
                dropped = stats.orphans_dropped,
                "dropped lines before the first entry"
            );
        }

        let summary = RunSummary {
            input_path: input,
            chunk_dir,
            chunks,
            bytes_written,
            stats,
            prepare,
        };
        info!(
            chunks = summary.chunk_count(),
            size = %summary.size_human(),
            dir = %summary.chunk_dir.display(),
            "segmentation complete"
        );
        Ok(summary)
    }
}

fn compile(config: &RunConfig) -> Result<BoundaryPattern, ConfigError> {
    if config.max_entries_per_chunk == 0 {
        return Err(ConfigError::InvalidMaxEntries { value: 0 });
    }
    BoundaryPattern::new(&config.boundary_pattern).map_err(|source| {
        ConfigError::InvalidPattern {
            profile: config.profile_name.clone(),
            pattern: config.boundary_pattern.clone(),
            source,
        }
    })
}

fn scan_error(err: ScanError, input: &Path, chunks_written: usize) -> RunError {
    match err {
        ScanError::Io { line, source } => RunError::Read {
            path: input.to_path_buf(),
            line,
            chunks_written,
            source,
        },
        ScanError::Cancelled { line } => RunError::Cancelled {
            line,
            chunks_written,
        },
    }
}

fn write_error(err: WriteError, chunks_written: usize) -> RunError {
    match err {
        WriteError::Prepare { path, source } => RunError::Prepare { path, source },
        WriteError::Chunk { path, source } => RunError::Write {
            path,
            chunks_written,
            source,
        },
    }
}
