//! Storage backends for chunk artifacts.
//!
//! [`ChunkWriter`](super::ChunkWriter) never touches the filesystem directly;
//! it goes through a [`ChunkStore`]. [`FsStore`] is the real thing,
//! [`MemoryStore`] keeps everything in memory and can inject failures.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::segment::LineGroup;

/// Filesystem primitives needed to prepare a directory and write chunks.
pub trait ChunkStore {
    /// Create `dir` and its parents. Returns `true` if it did not exist.
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<bool>;

    /// Names of the regular files directly inside `dir`.
    fn list_file_names(&self, dir: &Path) -> io::Result<Vec<String>>;

    fn remove_file(&mut self, path: &Path) -> io::Result<()>;

    /// Create (or truncate) `path` and write the group's bytes to it.
    fn write_file(&mut self, path: &Path, group: &LineGroup) -> io::Result<()>;
}

/// [`ChunkStore`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl ChunkStore for FsStore {
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<bool> {
        if dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(dir)?;
        Ok(true)
    }

    fn list_file_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn write_file(&mut self, path: &Path, group: &LineGroup) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        group.write_to(&mut out)?;
        out.flush()
    }
}

/// In-memory [`ChunkStore`] for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
    failing_removals: BTreeSet<PathBuf>,
    writes_allowed: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, registering its parent directory.
    pub fn insert_file(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.dirs.insert(parent.to_path_buf());
        }
        self.files.insert(path, bytes.into());
    }

    /// Make removing `path` fail with `PermissionDenied`.
    pub fn fail_removal_of(&mut self, path: impl Into<PathBuf>) {
        self.failing_removals.insert(path.into());
    }

    /// Let the first `count` writes succeed and fail every later one.
    pub fn fail_writes_after(&mut self, count: usize) {
        self.writes_allowed = Some(count);
    }

    pub fn has_dir(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    pub fn file(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Files directly inside `dir`, sorted by name.
    pub fn files_in(&self, dir: &Path) -> Vec<(String, &[u8])> {
        self.files
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .filter_map(|(path, bytes)| {
                let name = path.file_name()?.to_str()?.to_string();
                Some((name, bytes.as_slice()))
            })
            .collect()
    }
}

impl ChunkStore for MemoryStore {
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<bool> {
        Ok(self.dirs.insert(dir.to_path_buf()))
    }

    fn list_file_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        if !self.dirs.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", dir.display()),
            ));
        }
        Ok(self.files_in(dir).into_iter().map(|(name, _)| name).collect())
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        if self.failing_removals.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot remove {}", path.display()),
            ));
        }
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write_file(&mut self, path: &Path, group: &LineGroup) -> io::Result<()> {
        if self.writes_allowed.is_some_and(|allowed| self.writes >= allowed) {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        let parent_exists = path.parent().is_some_and(|dir| self.dirs.contains(dir));
        if !parent_exists {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory missing for {}", path.display()),
            ));
        }
        self.writes += 1;
        self.files.insert(path.to_path_buf(), group.to_bytes());
        Ok(())
    }
}
