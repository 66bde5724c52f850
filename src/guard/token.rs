//! Guard token derivation
//!
//! A header's guard token is a pure function of its path relative to the
//! include root: separators become `__`, dots become `_`, the result is
//! upper-cased and gets one trailing underscore.
//!
//! ```text
//! foo/bar.hpp          → FOO__BAR_HPP_
//! libaction/human.hpp  → LIBACTION__HUMAN_HPP_
//! ```
//!
//! The transform is not injective: `a/b.hpp` and `a__b.hpp` both map to
//! `A__B_HPP_`. Nothing checks for such collisions.

use anyhow::{Result, bail};
use std::path::{Component, Path};

/// Separator inserted between path components
pub const COMPONENT_SEPARATOR: &str = "__";

/// Compute the guard token for a root-relative header path
///
/// Only normal path components participate; `.` components are skipped so
/// `./foo.hpp` and `foo.hpp` yield the same token. Absolute paths, `..`
/// components and non UTF-8 names are rejected.
pub fn guard_token(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();

    for component in relative.components() {
        match component {
            Component::Normal(name) => match name.to_str() {
                Some(name) => parts.push(name),
                None => bail!("Path is not valid UTF-8: {}", relative.display()),
            },
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                bail!("Guard tokens need a path below the root, got: {}", relative.display())
            }
        }
    }

    if parts.is_empty() {
        bail!("Cannot derive a guard token from an empty path");
    }

    let mut token = parts.join(COMPONENT_SEPARATOR).replace('.', "_").to_uppercase();
    token.push('_');
    Ok(token)
}

/// Render a root-relative path with `/` separators for reporting
pub fn display_relative(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
