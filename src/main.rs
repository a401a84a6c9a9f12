//! roledoc CLI entry point.
//!
//! Parses arguments, executes the selected command, and renders any
//! failure as a user-friendly error before exiting non-zero.

use anyhow::Result;
use clap::Parser;
use roledoc::cli::Cli;
use roledoc::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let ctx = user_friendly_error(e);
            ctx.display();
            std::process::exit(1);
        }
    }
}
