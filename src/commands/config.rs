//! Config subcommands handler

use anyhow::{bail, Result};
use std::path::Path;

use logseg::Config;

use super::{config_file, load_config};

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the starter configuration.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_file(config_path)?;
    if path.exists() && !force {
        bail!(
            "Config file already exists: {}\nHint: use --force to overwrite it.",
            path.display()
        );
    }
    Config::example().save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Print where the configuration is read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", config_file(config_path)?.display());
    Ok(())
}
