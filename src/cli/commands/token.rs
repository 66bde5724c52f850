use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::guard::{display_relative, guard_token};

#[derive(Args, Debug, Clone)]
pub struct TokenArgs {
    /// Header paths relative to the include root
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Print `<path>: <token>` for each path without touching the filesystem
pub fn execute(args: TokenArgs) -> Result<()> {
    for path in &args.paths {
        println!("{}: {}", display_relative(path), guard_token(path)?);
    }
    Ok(())
}
