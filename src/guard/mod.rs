//! Include guard naming and rewriting
//!
//! Everything in this module is pure: token derivation works on paths as
//! strings and the rewrite works on in-memory lines. Reading and writing the
//! headers is the job of [`crate::storage`].

pub mod token;
pub mod transform;

pub use token::{display_relative, guard_token};
pub use transform::{GuardOutcome, Rewrite, render, rewrite_lines, rewrite_text, split_lines};
