//! Version command implementation

use anyhow::Result;
use clap::Args;

use crate::cli::Output;

#[derive(Args, Debug, Clone, Default)]
pub struct VersionArgs {
    /// Show detailed version information
    #[arg(long)]
    pub detailed: bool,
}

pub fn execute(args: VersionArgs, output: &Output) -> Result<()> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    if !args.detailed || output.is_quiet() {
        println!("{name} {version}");
        return Ok(());
    }

    output.header(&format!("{name} {version}"));
    output.key_value("Description:", env!("CARGO_PKG_DESCRIPTION"), false);
    output.key_value("License:", env!("CARGO_PKG_LICENSE"), false);
    output.key_value("Rust edition:", "2024", false);
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
        false,
    );
    output.blank_line();
    output.info(&format!("Run '{name} --help' for usage information"));
    Ok(())
}
