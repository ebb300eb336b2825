//! Command handlers for the logseg CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod chunk;
pub mod completions;
pub mod config;
pub mod extract;
pub mod profiles;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use logseg::Config;

/// Resolve the config file location: `--config` or the default path.
pub fn config_file(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::default_path().context("Could not locate the configuration file"),
    }
}

/// Load the configuration, attaching a hint for the missing-file case.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = config_file(config_path)?;
    Config::load_from(&path).with_context(|| {
        format!(
            "Could not load configuration.\nHint: run 'logseg config init' to create {}",
            path.display()
        )
    })
}
