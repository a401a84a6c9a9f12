//! Role metadata cache: construction, persistence, and lookup.
//!
//! Building a dependency chart means resolving every declared dependency
//! against the metadata of every known role. Re-parsing every role manifest
//! on each invocation would make that quadratic in practice, so the scan
//! result is persisted once as a JSON lookup table and read back by later
//! invocations until explicitly cleared.
//!
//! # Cache shape
//!
//! The persisted file keeps the two-level mapping the scan naturally
//! produces (search path → role short name → metadata). Resolution,
//! however, only ever knows a bare role name, so [`MetadataCache`] also
//! carries a flattened role-name index built at construction and load
//! time. Role names are expected to be unique across search paths; a
//! duplicate is reported explicitly and the first occurrence wins, rather
//! than being silently shadowed.
//!
//! # Failure isolation
//!
//! A single malformed role manifest does not abort the build. It is logged,
//! recorded on the [`BuildReport`], and skipped; the build only fails when
//! candidate manifests were found and none of them validated.

use crate::config::Config;
use crate::core::RoledocError;
use crate::metadata::{self, RoleMetadata};
use crate::scanner;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// The persisted two-level mapping: search path → role short name → metadata.
pub type RoleMap = BTreeMap<String, BTreeMap<String, RoleMetadata>>;

/// Outcome summary of one cache build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of roles whose metadata validated and was cached
    pub cached: usize,
    /// Per-role failure messages, in scan order
    pub failures: Vec<String>,
    /// Role short names that appeared under more than one search path
    pub shadowed: Vec<String>,
}

/// In-memory metadata cache with a flattened lookup index.
#[derive(Debug, Default)]
pub struct MetadataCache {
    roles: RoleMap,
    index: BTreeMap<String, RoleMetadata>,
}

impl MetadataCache {
    /// Build a cache from a two-level role map, flattening it into the
    /// lookup index. Duplicate role names across search paths are pushed
    /// onto `shadowed`; the first occurrence (in map order) wins.
    fn from_map(roles: RoleMap, shadowed: &mut Vec<String>) -> Self {
        let mut index = BTreeMap::new();
        for (search_path, entries) in &roles {
            for (role_name, meta) in entries {
                if index.contains_key(role_name) {
                    warn!(
                        "role '{role_name}' under {search_path} shadowed by an earlier search path"
                    );
                    shadowed.push(role_name.clone());
                } else {
                    index.insert(role_name.clone(), meta.clone());
                }
            }
        }
        Self { roles, index }
    }

    /// Look up a role's metadata by its bare role name.
    #[must_use]
    pub fn resolve(&self, role_name: &str) -> Option<&RoleMetadata> {
        self.index.get(role_name)
    }

    /// Number of distinct roles in the lookup index.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.index.len()
    }

    /// Whether the cache holds no roles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The persisted two-level view of the cache.
    #[must_use]
    pub fn roles(&self) -> &RoleMap {
        &self.roles
    }

    /// Write the cache to its configured location as pretty-printed JSON,
    /// creating the cache directory if needed. Idempotent.
    pub fn persist(&self, config: &Config) -> Result<()> {
        scanner::ensure_dir(&config.cache_dir)?;
        scanner::write_json_file(&config.cache_file(), &self.roles)
            .context("failed to persist role metadata cache")
    }

    /// Load a previously persisted cache, rebuilding the lookup index.
    ///
    /// Returns `Ok(None)` when no cache file exists yet.
    pub fn load(config: &Config) -> Result<Option<Self>> {
        let path = config.cache_file();
        if !path.exists() {
            debug!("no cache file at {}", path.display());
            return Ok(None);
        }

        let roles: RoleMap = scanner::read_json_file(&path)
            .with_context(|| format!("failed to load cache from {}", path.display()))?;
        let mut shadowed = Vec::new();
        Ok(Some(Self::from_map(roles, &mut shadowed)))
    }
}

/// Remove the persisted cache file. Returns whether a file was removed.
pub fn clear_cache(config: &Config) -> Result<bool> {
    let path = config.cache_file();
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(&path)
        .with_context(|| format!("failed to remove cache file {}", path.display()))?;
    Ok(true)
}

/// Scans role search paths and produces a persisted [`MetadataCache`].
pub struct CacheBuilder<'a> {
    config: &'a Config,
}

impl<'a> CacheBuilder<'a> {
    /// Create a builder bound to a configuration.
    #[must_use]
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Scan every search path for role manifests, validate each one, and
    /// persist the resulting cache.
    ///
    /// Invalid manifests are logged and recorded on the report; the build
    /// fails only when at least one candidate manifest was found and none
    /// validated.
    pub fn build(&self, search_paths: &[String]) -> Result<(MetadataCache, BuildReport)> {
        let suffix = self.config.meta_pattern.trim_start_matches("**/");
        let mut roles = RoleMap::new();
        let mut report = BuildReport::default();
        let mut candidates = 0_usize;

        for search_path in search_paths {
            let files = scanner::find_files(Path::new(search_path), &self.config.meta_pattern)?;
            debug!(
                "found {} role manifest(s) under {search_path}",
                files.len()
            );

            for file in files {
                candidates += 1;
                let role_name = metadata::role_short_name(search_path, &file.path, suffix);
                let label = format!("{search_path}/{role_name}");

                match metadata::parse_role_manifest(&file.path, &label) {
                    Ok(meta) => {
                        roles
                            .entry(search_path.clone())
                            .or_default()
                            .insert(role_name, meta);
                        report.cached += 1;
                    }
                    Err(e) => {
                        warn!("skipping role {label}: {e}");
                        report.failures.push(e.to_string());
                    }
                }
            }
        }

        if candidates > 0 && report.cached == 0 {
            return Err(RoledocError::NoValidRoles { candidates }.into());
        }

        let cache = MetadataCache::from_map(roles, &mut report.shadowed);
        cache.persist(self.config)?;
        println!("Role metadata cached");

        Ok((cache, report))
    }
}
