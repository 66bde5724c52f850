use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::{GuardConfig, GuardSettings, SettingsOverrides};

pub mod check;
pub mod fix;
pub mod token;
pub mod version;

#[derive(Parser)]
#[command(
    name = "incguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Rewrite C/C++ header include guards to canonical, path-derived names",
    long_about = "incguard walks a header directory and gives every header an \
                  #ifndef/#define/#endif guard named after its path below the root, \
                  e.g. include/foo/bar.hpp gets FOO__BAR_HPP_. Leading license \
                  comments stay in front of the guard."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite include guards in place (default)
    Fix(fix::FixArgs),
    /// Report headers whose include guard is out of date
    Check(check::CheckArgs),
    /// Print the guard token for root-relative header paths
    Token(token::TokenArgs),
    /// Show version information
    Version(version::VersionArgs),
}

/// Which headers to process, shared by `fix` and `check`
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Header root directory [default: include]
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Header file suffix [default: .hpp]
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Root-relative glob patterns of headers to skip
    #[arg(long, value_delimiter = ',', value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SelectionArgs {
    /// Output handler suited to the selected format
    pub fn output(&self, output: &Output) -> Output {
        match self.format {
            OutputFormat::Json => output.silenced(),
            OutputFormat::Text => output.clone(),
        }
    }

    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            root: self.root.clone(),
            extension: self.extension.clone(),
            exclude: self.exclude.clone(),
        }
    }

    /// Resolve settings from config sources with these flags on top
    pub fn settings(&self, config_path: Option<&str>) -> Result<GuardSettings> {
        GuardConfig::load_with(config_path, Some(&self.overrides()))?
            .settings()
            .context("Invalid configuration")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<path>: <token>` lines and a short summary
    #[default]
    Text,
    /// One JSON document describing every header
    Json,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        // Change directory if specified
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {dir}"))?;
        }

        // Set up logging based on verbosity
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let config = self.config.as_deref();

        match self.command {
            Some(Commands::Fix(args)) => fix::execute(args, config, &output),
            Some(Commands::Check(args)) => check::execute(args, config, &output),
            Some(Commands::Token(args)) => token::execute(args),
            Some(Commands::Version(args)) => version::execute(args, &output),
            None => fix::execute(fix::FixArgs::default(), config, &output),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // Keep walker internals quiet unless tracing everything
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
