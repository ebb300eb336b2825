//! Extract command handler

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use logseg::extract_json;

/// Print the JSON value recovered from `file` (or stdin).
#[cfg(not(tarpaulin_include))]
pub fn handle(file: Option<&Path>) -> Result<()> {
    let raw = match file {
        Some(path) => read_lossy(path)?,
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
    };
    println!("{}", extract_json(&raw));
    Ok(())
}

/// Read a file, replacing invalid UTF-8 instead of failing.
fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
