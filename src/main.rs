use anyhow::Result;
use clap::Parser;

use incguard::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
