//! Chunk command handler
//!
//! 1. Load config and apply command-line overrides
//! 2. Resolve the run settings (profile, pattern, entry cap)
//! 3. Segment the input file, or each .log file in the input directory
//! 4. Print a summary per file

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;

use logseg::config::Overrides;
use logseg::{ChunkWriter, OrphanPolicy, RunError, Runner};

use super::load_config;

/// Command-line values for `logseg chunk`.
pub struct ChunkArgs {
    pub input: Option<PathBuf>,
    pub profile: Option<String>,
    pub output: Option<PathBuf>,
    pub max_entries: Option<usize>,
    pub orphans: Option<OrphanPolicy>,
}

impl ChunkArgs {
    fn overrides(self) -> Overrides {
        Overrides {
            input: self.input,
            output_dir: self.output,
            profile: self.profile,
            max_entries: self.max_entries,
            orphan_policy: self.orphans,
        }
    }
}

/// Segment the configured input into chunk files.
#[cfg(not(tarpaulin_include))]
pub fn handle(config_path: Option<&Path>, args: ChunkArgs) -> Result<()> {
    let config = load_config(config_path)?.with_overrides(&args.overrides());
    let run_config = config.run_config()?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .ok(); // Ignore if handler already set

    let mut runner = Runner::new(ChunkWriter::fs()).with_cancel(interrupted);
    let summaries = match runner.run_path(&run_config) {
        Ok(summaries) => summaries,
        Err(e @ RunError::Cancelled { .. }) => {
            eprintln!("Interrupted. Chunks written before the interrupt were kept.");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if summaries.is_empty() {
        println!(
            "No .log files found in {}",
            run_config.input_path.display()
        );
        return Ok(());
    }

    for summary in &summaries {
        println!("{}", summary.summary());
        if summary.chunk_count() == 0 && summary.stats.orphans_dropped > 0 {
            eprintln!(
                "Warning: pattern '{}' never matched; {} lines were dropped. Check the profile.",
                run_config.boundary_pattern, summary.stats.orphans_dropped
            );
        }
    }

    if summaries.len() > 1 {
        let total: usize = summaries.iter().map(|s| s.chunk_count()).sum();
        println!("Total: {} chunks from {} files", total, summaries.len());
    }
    Ok(())
}
