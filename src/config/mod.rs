//! Configuration management for incguard
//!
//! Settings come from a figment stack (see [`GuardConfig`]) and are
//! extracted into [`GuardSettings`], the only type the rest of the crate reads.

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod core;

pub use self::core::GuardConfig;

/// Resolved settings for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardSettings {
    /// Directory walked for headers; tokens derive from paths below it
    pub root: PathBuf,

    /// File name suffix selecting headers
    pub extension: String,

    /// Glob patterns (root-relative) of headers to leave alone
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Replace files through a temporary file
    #[serde(default = "default_atomic_write")]
    pub atomic_write: bool,

    /// Descend into symlinked directories
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_atomic_write() -> bool {
    true
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("include"),
            extension: ".hpp".to_string(),
            exclude: vec![],
            atomic_write: true,
            follow_symlinks: false,
        }
    }
}

impl GuardSettings {
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            bail!("Header root cannot be empty");
        }
        if self.extension.is_empty() {
            bail!("Header extension cannot be empty");
        }
        self.exclude_set()?;
        Ok(())
    }

    /// Compile the exclude patterns
    pub fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern)
                .with_context(|| format!("Invalid exclude pattern: {pattern}"))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}

/// Values given on the command line, layered over every other source
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

#[cfg(test)]
mod tests;
