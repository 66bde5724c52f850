//! Check command implementation
//!
//! Runs the rewrite in memory and fails when any header would change. Meant
//! for CI and pre-commit hooks.

use anyhow::{Result, bail};
use clap::Args;

use super::fix::{print_json, process};
use super::{OutputFormat, SelectionArgs};
use crate::cli::Output;
use crate::rewriter::RunMode;

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

pub fn execute(args: CheckArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let settings = args.selection.settings(config_path)?;
    let output = &args.selection.output(output);
    let summary = process(&settings, RunMode::Check, args.selection.format, output)?;

    match args.selection.format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => {
            output.run_summary(&summary, "Stale include guards:");
            for file in summary.stale() {
                output.list_item(&format!("{} (guard {})", file.path, file.outcome.label()));
            }
        }
    }

    let stale = summary.changed();
    if stale > 0 {
        bail!("{stale} header(s) need their include guard rewritten; run `incguard fix`");
    }

    output.success("All include guards are up to date");
    Ok(())
}
