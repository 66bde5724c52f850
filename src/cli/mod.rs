//! Command-line interface for incguard
//!
//! Argument parsing lives in [`commands`], console formatting in [`output`].

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
