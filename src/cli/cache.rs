//! The `cache` command: build, clear, and inspect the metadata cache.

use crate::cache::{CacheBuilder, MetadataCache, clear_cache};
use crate::config::Config;
use anyhow::Result;
use clap::{Args, Subcommand};

/// Manage the persisted role metadata cache.
#[derive(Args)]
pub struct CacheCommand {
    #[command(subcommand)]
    command: CacheSubcommand,
}

#[derive(Subcommand)]
enum CacheSubcommand {
    /// Scan role search paths and persist a fresh metadata cache
    Build {
        /// Role search directories to scan; when omitted, the paths are
        /// read from the Ansible configuration dump
        #[arg(long = "roles-path", value_name = "DIR")]
        roles_paths: Vec<String>,
    },
    /// Remove the persisted cache file
    Clear,
    /// Show the cache location and how many roles it holds
    Info,
}

impl CacheCommand {
    /// Dispatch to the selected cache operation.
    pub async fn execute(self, config: &Config) -> Result<()> {
        match self.command {
            CacheSubcommand::Build { roles_paths } => {
                let search_paths =
                    super::dependencies::resolve_search_paths(&roles_paths).await?;
                let (_, report) = CacheBuilder::new(config).build(&search_paths)?;
                if !report.failures.is_empty() {
                    println!("Skipped {} invalid role manifest(s):", report.failures.len());
                    for failure in &report.failures {
                        println!("\t{failure}");
                    }
                }
                for role in &report.shadowed {
                    println!("Warning: role '{role}' exists under multiple search paths");
                }
                Ok(())
            }
            CacheSubcommand::Clear => {
                if clear_cache(config)? {
                    println!("Cache cleared");
                } else {
                    println!("No cache to clear");
                }
                Ok(())
            }
            CacheSubcommand::Info => {
                println!("Cache file: {}", config.cache_file().display());
                match MetadataCache::load(config)? {
                    Some(cache) => println!("Cached roles: {}", cache.role_count()),
                    None => println!("Cache not built yet"),
                }
                Ok(())
            }
        }
    }
}
