//! Fix command implementation
//!
//! Rewrites every selected header so its guard matches its path.

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use super::{OutputFormat, SelectionArgs};
use crate::cli::Output;
use crate::discovery::HeaderWalker;
use crate::rewriter::{RunMode, RunSummary, Rewriter};
use crate::storage::DiskStore;

#[derive(Args, Debug, Clone, Default)]
pub struct FixArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Show what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: FixArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let settings = args.selection.settings(config_path)?;
    let output = &args.selection.output(output);
    debug!("settings: {:?}", settings);

    let mode = if args.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Write
    };
    let summary = process(&settings, mode, args.selection.format, output)?;

    match args.selection.format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            if args.dry_run {
                output.run_summary(&summary, "Headers that would change:");
                for file in summary.stale() {
                    output.list_item(&file.path);
                }
            } else {
                output.run_summary(&summary, "Headers rewritten:");
                if summary.processed() == 0 {
                    output.warning(&format!(
                        "No '*{}' headers found under {}",
                        settings.extension,
                        settings.root.display()
                    ));
                } else {
                    output.success("Include guards are up to date");
                }
            }
            Ok(())
        }
    }
}

/// Discover and rewrite headers, printing report lines for text output
pub(super) fn process(
    settings: &crate::config::GuardSettings,
    mode: RunMode,
    format: OutputFormat,
    output: &Output,
) -> Result<RunSummary> {
    let walker = HeaderWalker::from_settings(settings)?;
    let headers = walker.discover()?;
    output.verbose(&format!(
        "Found {} headers under {}",
        headers.len(),
        walker.root().display()
    ));

    let mut rewriter = Rewriter::new(DiskStore::new(settings.atomic_write), mode);
    rewriter.run(&headers, |report| {
        if format == OutputFormat::Text {
            output.report(report);
        }
    })
}

pub(super) fn print_json(summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
    println!("{json}");
    Ok(())
}
