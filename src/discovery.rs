//! Header discovery
//!
//! Walks the include root recursively and keeps files whose name ends with the
//! configured extension. Nothing is filtered by ignore files or hidden-ness:
//! every directory below the root is descended. Entries are visited sorted by
//! file name so runs report in a stable order. Symlinks to files count as
//! headers either way; `follow_symlinks` only decides whether symlinked
//! directories are descended.

use anyhow::{Context, Result, bail};
use globset::GlobSet;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::config::GuardSettings;

/// A header selected for rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFile {
    /// Path used for reading and writing (root joined with `relative`)
    pub path: PathBuf,
    /// Path below the root, the seed of the guard token
    pub relative: PathBuf,
}

/// Finds headers below a root directory
#[derive(Debug, Clone)]
pub struct HeaderWalker {
    root: PathBuf,
    extension: String,
    exclude: GlobSet,
    follow_symlinks: bool,
}

impl HeaderWalker {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            exclude: GlobSet::empty(),
            follow_symlinks: false,
        }
    }

    pub fn from_settings(settings: &GuardSettings) -> Result<Self> {
        Ok(Self::new(&settings.root, &settings.extension)
            .exclude(settings.exclude_set()?)
            .follow_symlinks(settings.follow_symlinks))
    }

    pub fn exclude(mut self, exclude: GlobSet) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_header(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&self.extension))
    }

    /// Collect all headers below the root
    ///
    /// Fails before returning anything when the root is missing or any entry
    /// cannot be read.
    pub fn discover(&self) -> Result<Vec<HeaderFile>> {
        if !self.root.is_dir() {
            bail!("Header root is not a directory: {}", self.root.display());
        }

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut headers = Vec::new();
        for entry in walker {
            let entry = entry
                .with_context(|| format!("Failed to walk {}", self.root.display()))?;

            let path = entry.path();
            let is_file = match entry.file_type() {
                Some(ft) if ft.is_symlink() => path.is_file(),
                Some(ft) => ft.is_file(),
                None => false,
            };
            if !is_file {
                continue;
            }
            if !self.is_header(path) {
                trace!("skipping {}", path.display());
                continue;
            }

            let relative = path
                .strip_prefix(&self.root)
                .with_context(|| format!("{} is not below {}", path.display(), self.root.display()))?
                .to_path_buf();

            if self.exclude.is_match(&relative) {
                debug!("excluded {}", relative.display());
                continue;
            }

            headers.push(HeaderFile {
                path: path.to_path_buf(),
                relative,
            });
        }

        debug!("found {} headers under {}", headers.len(), self.root.display());
        Ok(headers)
    }
}
