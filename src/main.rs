//! modlens CLI entry point.
//!
//! Parses command-line arguments, executes the requested subcommand, and
//! renders failures as user-friendly errors with suggestions.

use anyhow::Result;
use clap::Parser;
use modlens::cli;
use modlens::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(err) => {
            let context = user_friendly_error(err);
            context.display();
            std::process::exit(1);
        }
    }
}
