//! File access for the rewriter
//!
//! The rewriter only reads and writes whole files, so that is all the
//! [`FileStore`] trait offers. [`DiskStore`] is used by the CLI,
//! [`MemoryStore`] keeps contents in a map and is what the tests use.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::debug;

/// Whole-file read and write access
pub trait FileStore {
    /// Read a file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace a file's content
    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// Store backed by the real filesystem
#[derive(Debug, Clone)]
pub struct DiskStore {
    atomic: bool,
}

impl DiskStore {
    /// Create a store; with `atomic` set, writes go through a temporary file
    /// that is renamed over the target once fully written
    pub fn new(atomic: bool) -> Self {
        Self { atomic }
    }

    fn write_in_place(mut target: File, path: &Path, contents: &[u8]) -> Result<()> {
        target
            .set_len(0)
            .and_then(|_| target.write_all(contents))
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Replace `path` by renaming a fully written sibling over it
    ///
    /// `path` must already be resolved: renaming over a symlink would replace
    /// the link instead of the header behind it. When the original owner cannot
    /// be kept the header is written in place through `target`.
    fn write_atomic(&self, target: File, path: &Path, contents: &[u8]) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let metadata = target
            .metadata()
            .with_context(|| format!("Failed to read metadata of {}", path.display()))?;

        let mut temp_file = Builder::new()
            .prefix(".incguard")
            .tempfile_in(parent)
            .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::{MetadataExt, fchown};

            let owner = (metadata.uid(), metadata.gid());
            let temp_owner = temp_file
                .as_file()
                .metadata()
                .map(|meta| (meta.uid(), meta.gid()))
                .with_context(|| format!("Failed to read metadata of temporary file for {}", path.display()))?;
            if temp_owner != owner
                && fchown(temp_file.as_file(), Some(owner.0), Some(owner.1)).is_err()
            {
                debug!("{}: owner cannot be kept, writing in place", path.display());
                drop(temp_file);
                return Self::write_in_place(target, path, contents);
            }
        }

        temp_file
            .write_all(contents)
            .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
        temp_file
            .as_file_mut()
            .sync_all()
            .with_context(|| format!("Failed to flush temporary file for {}", path.display()))?;
        temp_file
            .as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
        temp_file
            .persist(path)
            .map_err(|error| error.error)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

impl Default for DiskStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FileStore for DiskStore {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        // A header that cannot be opened for writing is never replaced
        let target = OpenOptions::new()
            .write(true)
            .open(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        if !self.atomic {
            return Self::write_in_place(target, path, contents.as_bytes());
        }

        let resolved = fs::canonicalize(path)
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        self.write_atomic(target, &resolved, contents.as_bytes())
    }
}

/// Store holding file contents in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file without counting it as a write
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Number of writes performed through [`FileStore::write`]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl FileStore for MemoryStore {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .with_context(|| format!("Failed to read {}: no such file", path.display()))
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        self.writes += 1;
        Ok(())
    }
}
