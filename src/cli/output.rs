//! Console output for incguard
//!
//! Styled status lines go through [`Output`] and respect `--quiet`. The
//! `<path>: <token>` report lines are plain so they stay easy to parse.

use console::style;

use crate::rewriter::{FileReport, RunSummary};

/// Output handler for consistent CLI formatting
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Handler for machine-readable runs: styled lines are dropped so stdout
    /// only carries the document
    pub fn silenced(&self) -> Self {
        Self {
            verbose: false,
            quiet: true,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print the audit line for one header
    pub fn report(&self, report: &FileReport) {
        println!("{}", report.report_line());
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {} {}", style(key).dim(), styled_value);
        }
    }

    /// Print summary statistics with enhanced styling
    pub fn summary_stats(&self, label: &str, value: usize) {
        if !self.quiet {
            println!("  {} {}", style(label).dim(), style(value.to_string()).bold());
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if !self.quiet {
            println!("  • {}", item);
        }
    }

    /// Print blank line
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Print the counts of a finished run
    pub fn run_summary(&self, summary: &RunSummary, changed_label: &str) {
        if self.quiet {
            return;
        }
        self.blank_line();
        self.summary_stats("Headers processed:", summary.processed());
        self.summary_stats(changed_label, summary.changed());
        if summary.nested() > 0 {
            self.summary_stats("Unrecognized guards wrapped:", summary.nested());
        }
    }
}
