//! The `dependencies` command: the full discovery → cache → chart pipeline.

use crate::cache::{CacheBuilder, MetadataCache};
use crate::chart::ChartCompiler;
use crate::config::Config;
use crate::discovery;
use anyhow::Result;
use clap::Args;
use tracing::{debug, info};

/// Generate a dependency chart for every role under the configured search
/// paths and merge it into each role's blueprint document.
#[derive(Args)]
pub struct DependenciesCommand {
    /// Role search directories to scan; when omitted, the paths are read
    /// from the Ansible configuration dump
    #[arg(long = "roles-path", value_name = "DIR")]
    roles_paths: Vec<String>,

    /// Rebuild the metadata cache even if a persisted copy exists
    #[arg(long)]
    refresh_cache: bool,
}

impl DependenciesCommand {
    /// Run the pipeline: resolve search paths, ensure the cache, compile
    /// every chart, and report the outcome.
    pub async fn execute(self, config: &Config) -> Result<()> {
        let search_paths = resolve_search_paths(&self.roles_paths).await?;
        debug!("scanning {} search path(s)", search_paths.len());

        // The cache must be complete before any chart is compiled.
        let cache = ensure_cache(config, &search_paths, self.refresh_cache)?;
        info!("cache holds {} role(s)", cache.role_count());

        let summary = ChartCompiler::new(config, &cache).compile_all(&search_paths)?;
        if summary.skipped > 0 {
            println!(
                "Done ({} generated, {} skipped)",
                summary.generated, summary.skipped
            );
        } else {
            println!("Done");
        }
        Ok(())
    }
}

/// Use the explicitly passed directories, or fall back to the Ansible
/// configuration dump.
pub(crate) async fn resolve_search_paths(roles_paths: &[String]) -> Result<Vec<String>> {
    if !roles_paths.is_empty() {
        return Ok(roles_paths.to_vec());
    }
    let dump = discovery::get_default_roles().await?;
    Ok(discovery::parse_default_roles(&dump)?)
}

/// Load the persisted cache, or build and persist it when missing or a
/// refresh was requested.
fn ensure_cache(
    config: &Config,
    search_paths: &[String],
    refresh: bool,
) -> Result<MetadataCache> {
    if !refresh {
        if let Some(cache) = MetadataCache::load(config)? {
            debug!("loaded persisted cache from {}", config.cache_file().display());
            return Ok(cache);
        }
    }
    let (cache, report) = CacheBuilder::new(config).build(search_paths)?;
    if !report.failures.is_empty() {
        println!("Skipped {} invalid role manifest(s)", report.failures.len());
    }
    Ok(cache)
}
