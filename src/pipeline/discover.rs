//! Input discovery for directory runs.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::RunError;

/// `.log` files directly inside `dir`, sorted by path.
pub fn find_log_files(dir: &Path) -> Result<Vec<PathBuf>, RunError> {
    let discover_err = |source| RunError::Discover {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(discover_err)? {
        let path = entry.map_err(discover_err)?.path();
        let is_log = path.extension().and_then(|e| e.to_str()) == Some("log");
        if is_log && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
