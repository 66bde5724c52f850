//! # incguard - canonical include guards for C/C++ headers
//!
//! incguard walks a header directory (by default `include/`) and rewrites the
//! `#ifndef`/`#define`/`#endif` guard of every `*.hpp` file so its name is
//! derived from the header's path below that directory:
//!
//! ```text
//! include/foo/bar.hpp  →  FOO__BAR_HPP_
//! ```
//!
//! Leading license or doc comments stay in front of the guard, an existing
//! guard in the recognized shape is replaced, and running the tool twice
//! changes nothing the second time.
//!
//! ## Quick Start
//!
//! ```bash
//! # Rewrite guards under ./include
//! incguard
//!
//! # Fail in CI when a guard is stale
//! incguard check
//!
//! # Different layout
//! incguard fix --root src/public --extension .h
//! ```
//!
//! ## Library Usage
//!
//! The rewrite itself is pure and works on strings:
//!
//! ```rust
//! use incguard::guard::{guard_token, rewrite_text};
//! use std::path::Path;
//!
//! let token = guard_token(Path::new("foo/bar.hpp"))?;
//! assert_eq!(token, "FOO__BAR_HPP_");
//!
//! let rewrite = rewrite_text("int x;\n", &token);
//! assert_eq!(
//!     rewrite.text(),
//!     "#ifndef FOO__BAR_HPP_\n#define FOO__BAR_HPP_\n\nint x;\n\n#endif\n"
//! );
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod guard;
pub mod rewriter;
pub mod storage;

pub use cli::{Cli, Output};
pub use config::{GuardConfig, GuardSettings};

/// Result type alias for incguard operations
pub type Result<T> = anyhow::Result<T>;
