//! Command-line interface for roledoc.
//!
//! The CLI exposes two surfaces over the core subsystems:
//! - `dependencies` - discover role search paths, make sure the metadata
//!   cache exists, and compile a dependency chart into every role's
//!   blueprint document
//! - `cache` - manage the persisted metadata cache directly
//!   (`build`, `clear`, `info`)
//!
//! Each command is implemented in its own module with its own argument
//! struct and an async `execute` taking the shared [`Config`].
//!
//! # Global options
//!
//! - `--verbose` / `--quiet` - logging verbosity
//! - `--cache-dir` - override the cache location (used heavily in tests)
//! - `--roles-path` (on `dependencies` and `cache build`) - scan explicit
//!   directories instead of asking the Ansible configuration

mod cache;
mod dependencies;

use crate::config::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Top-level argument parser.
#[derive(Parser)]
#[command(name = "roledoc", version, about = "Document the dependency relationships of configuration roles")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug-level logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Override the metadata cache directory (default: ~/.local/roledoc)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Generate role dependency charts and merge them into each role's
    /// blueprint document.
    Dependencies(dependencies::DependenciesCommand),

    /// Manage the persisted role metadata cache.
    Cache(cache::CacheCommand),
}

impl Cli {
    /// Initialize logging and dispatch to the selected command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();
        let config = self
            .cache_dir
            .map_or_else(Config::new, Config::with_cache_dir);

        match self.command {
            Commands::Dependencies(cmd) => cmd.execute(&config).await,
            Commands::Cache(cmd) => cmd.execute(&config).await,
        }
    }

    /// Set up the tracing subscriber from the verbosity flags.
    ///
    /// An explicit `RUST_LOG` always wins; the flags only provide the
    /// fallback level.
    fn init_logging(&self) {
        let fallback = if self.verbose {
            "roledoc=debug"
        } else if self.quiet {
            "roledoc=error"
        } else {
            "roledoc=warn"
        };

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    }
}
