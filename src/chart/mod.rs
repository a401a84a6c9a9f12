//! Dependency chart compilation.
//!
//! For every role that declares dependencies in a `requirements.yml`, the
//! compiler resolves each declaration against the metadata cache, renders
//! the result into a 4-column table, and merges the table into the role's
//! blueprint document. The cache must be fully built before compilation
//! starts; the compiler never writes to it.
//!
//! # Failure isolation
//!
//! One role's failure never stops the batch. A dependency entry without a
//! `name` is skipped with a log line; a rendering failure (malformed cached
//! metadata, unrecognized platform) abandons that one role's chart and the
//! loop moves on to the next manifest. Only I/O errors while scanning a
//! search path propagate.

pub mod render;

pub use render::{DependencyRow, OsIcon, dependency_row, unresolved_row};

use crate::blueprint;
use crate::cache::MetadataCache;
use crate::config::Config;
use crate::metadata;
use crate::scanner;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Header row prepended to every non-empty dependency report.
pub const HEADER: [&str; 4] = ["Role Dependency", "Description", "Supported OSes", "Status"];

/// Shape of a dependency manifest. Unknown keys are ignored; the whole
/// file may also be empty or null.
#[derive(Debug, Default, Deserialize)]
struct RequirementsManifest {
    #[serde(default)]
    roles: Vec<RequirementEntry>,
}

#[derive(Debug, Deserialize)]
struct RequirementEntry {
    name: Option<String>,
}

/// Read the dependency declarations out of a `requirements.yml`.
///
/// An empty or null manifest yields an empty list. Entries without a
/// `name` are logged and skipped.
pub fn read_dependencies(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let manifest: Option<RequirementsManifest> = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let manifest = manifest.unwrap_or_default();

    let mut names = Vec::with_capacity(manifest.roles.len());
    for entry in manifest.roles {
        match entry.name {
            Some(name) => names.push(name),
            None => warn!("skipping dependency entry without a name in {}", path.display()),
        }
    }
    Ok(names)
}

/// Totals for one compilation pass over all search paths.
#[derive(Debug, Default)]
pub struct CompileSummary {
    /// Roles whose chart was generated and merged
    pub generated: usize,
    /// Roles abandoned because of a per-role failure
    pub skipped: usize,
}

/// Compiles dependency charts against a read-only metadata cache.
pub struct ChartCompiler<'a> {
    config: &'a Config,
    cache: &'a MetadataCache,
}

impl<'a> ChartCompiler<'a> {
    /// Create a compiler over a fully built cache.
    #[must_use]
    pub const fn new(config: &'a Config, cache: &'a MetadataCache) -> Self {
        Self { config, cache }
    }

    /// Compile a chart for every role with a dependency manifest under any
    /// of the search paths. Per-role failures are reported and counted but
    /// never abort the pass.
    pub fn compile_all(&self, search_paths: &[String]) -> Result<CompileSummary> {
        let suffix = self.config.requirements_pattern.trim_start_matches("**/");
        let mut summary = CompileSummary::default();

        for search_path in search_paths {
            let files =
                scanner::find_files(Path::new(search_path), &self.config.requirements_pattern)?;
            debug!(
                "found {} dependency manifest(s) under {search_path}",
                files.len()
            );

            for file in files {
                let role_name = metadata::role_short_name(search_path, &file.path, suffix);
                println!("Generating role dependency for {role_name}");

                match self.compile_role(search_path, &role_name, &file.path) {
                    Ok(()) => summary.generated += 1,
                    Err(e) => {
                        warn!("chart generation failed for {role_name}: {e}");
                        println!("\tCouldn't generate dependency chart for {role_name}: {e}");
                        summary.skipped += 1;
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Compile and merge the chart for a single role.
    ///
    /// Resolution misses degrade to placeholder rows; malformed cached
    /// metadata or an unrecognized platform fails the role.
    pub fn compile_role(
        &self,
        search_path: &str,
        role_name: &str,
        requirements_file: &Path,
    ) -> Result<()> {
        let dependencies = read_dependencies(requirements_file)?;

        let mut rows: Vec<DependencyRow> = Vec::with_capacity(dependencies.len() + 1);
        if dependencies.is_empty() {
            println!("\tNo dependencies found in {role_name}");
        } else {
            rows.push(HEADER.map(String::from));
        }

        for declaration in &dependencies {
            // Only the trailing segment keys into the cache; the namespace
            // segment of the declaration is not used for lookup.
            let dep_name = declaration.rsplit('.').next().unwrap_or(declaration);
            println!("\tReading dependency {dep_name}");

            let row = match self.cache.resolve(dep_name) {
                Some(meta) => dependency_row(self.config, meta, declaration)?,
                None => unresolved_row(declaration),
            };
            rows.push(row);
        }

        let role_dir = Path::new(search_path).join(role_name);
        blueprint::merge_report(&role_dir, &serde_json::to_value(&rows)?)?;

        println!("\tGenerated role dependency chart for {role_name}!");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheBuilder;
    use serde_json::Value;
    use std::fs;
    use tempfile::tempdir;

    fn write_role(base: &Path, name: &str, manifest: &str) {
        let meta = base.join(name).join("meta");
        fs::create_dir_all(&meta).unwrap();
        fs::write(meta.join("main.yml"), manifest).unwrap();
    }

    fn write_requirements(base: &Path, name: &str, content: &str) {
        let dir = base.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("requirements.yml"), content).unwrap();
    }

    fn setup() -> (tempfile::TempDir, Config, Vec<String>) {
        let temp = tempdir().unwrap();
        let roles_dir = temp.path().join("roles");
        fs::create_dir_all(&roles_dir).unwrap();
        let config = Config::with_cache_dir(temp.path().join("cache"));
        let search = vec![roles_dir.to_string_lossy().to_string()];
        (temp, config, search)
    }

    fn read_report(roles_dir: &Path, role: &str) -> Value {
        let path = roles_dir
            .join(role)
            .join(blueprint::BLUEPRINT_DIR)
            .join(blueprint::DOCUMENT_NAME);
        let doc: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        doc[blueprint::REPORT_KEY].clone()
    }

    #[test]
    fn test_read_dependencies() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("requirements.yml");
        fs::write(&path, "roles:\n  - name: acme.web\n  - name: acme.db\n").unwrap();
        assert_eq!(read_dependencies(&path).unwrap(), vec!["acme.web", "acme.db"]);
    }

    #[test]
    fn test_read_dependencies_empty_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("requirements.yml");
        fs::write(&path, "").unwrap();
        assert!(read_dependencies(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_dependencies_skips_nameless_entries() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("requirements.yml");
        fs::write(&path, "roles:\n  - src: https://example.com/role.git\n  - name: acme.web\n")
            .unwrap();
        assert_eq!(read_dependencies(&path).unwrap(), vec!["acme.web"]);
    }

    #[test]
    fn test_compile_end_to_end() {
        let (temp, config, search) = setup();
        let roles_dir = temp.path().join("roles");

        write_role(
            &roles_dir,
            "web",
            "galaxy_info:\n  role_name: web\n  author: acme\n  description: Web server\n  platforms:\n    - name: Ubuntu\n  repository: https://x\n  repository_status: https://img\n",
        );
        write_requirements(&roles_dir, "db", "roles:\n  - name: acme.web\n");

        let (cache, _) = CacheBuilder::new(&config).build(&search).unwrap();
        let summary = ChartCompiler::new(&config, &cache).compile_all(&search).unwrap();
        assert_eq!(summary.generated, 1);
        assert_eq!(summary.skipped, 0);

        let report = read_report(&roles_dir, "db");
        let rows = report.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "Role Dependency");
        assert_eq!(
            rows[1][0],
            "<a href=\"https://galaxy.ansible.com/acme/web\" title=\"acme.web on Ansible Galaxy\" target=\"_blank\">acme.web</a>"
        );
        assert_eq!(rows[1][1], "Web server");
        assert!(rows[1][2].as_str().unwrap().contains("ubuntu.png"));
        assert!(rows[1][3].as_str().unwrap().contains("https://img"));
    }

    #[test]
    fn test_unknown_dependency_degrades_to_unavailable() {
        let (temp, config, search) = setup();
        let roles_dir = temp.path().join("roles");
        write_requirements(&roles_dir, "db", "roles:\n  - name: acme.ghost\n");

        let (cache, _) = CacheBuilder::new(&config).build(&search).unwrap();
        let summary = ChartCompiler::new(&config, &cache).compile_all(&search).unwrap();
        assert_eq!(summary.generated, 1);

        let report = read_report(&roles_dir, "db");
        let rows = report.as_array().unwrap();
        assert_eq!(rows[1][0], "acme.ghost");
        assert_eq!(rows[1][3], "Unavailable");
    }

    #[test]
    fn test_empty_manifest_merges_empty_report() {
        let (temp, config, search) = setup();
        let roles_dir = temp.path().join("roles");
        write_requirements(&roles_dir, "db", "");

        let (cache, _) = CacheBuilder::new(&config).build(&search).unwrap();
        ChartCompiler::new(&config, &cache).compile_all(&search).unwrap();

        let report = read_report(&roles_dir, "db");
        assert_eq!(report, serde_json::json!([]));
    }

    #[test]
    fn test_bad_platform_skips_only_that_role() {
        let (temp, config, search) = setup();
        let roles_dir = temp.path().join("roles");

        write_role(
            &roles_dir,
            "weird",
            "galaxy_info:\n  role_name: weird\n  author: acme\n  description: d\n  platforms:\n    - name: Solaris\n",
        );
        write_role(
            &roles_dir,
            "web",
            "galaxy_info:\n  role_name: web\n  author: acme\n  description: d\n",
        );
        write_requirements(&roles_dir, "broken", "roles:\n  - name: acme.weird\n");
        write_requirements(&roles_dir, "ok", "roles:\n  - name: acme.web\n");

        let (cache, _) = CacheBuilder::new(&config).build(&search).unwrap();
        let summary = ChartCompiler::new(&config, &cache).compile_all(&search).unwrap();

        assert_eq!(summary.generated, 1);
        assert_eq!(summary.skipped, 1);
        assert!(read_report(&roles_dir, "ok").as_array().unwrap().len() == 2);
        assert!(
            !roles_dir
                .join("broken")
                .join(blueprint::BLUEPRINT_DIR)
                .join(blueprint::DOCUMENT_NAME)
                .exists()
        );
    }

    #[test]
    fn test_compilation_is_idempotent() {
        let (temp, config, search) = setup();
        let roles_dir = temp.path().join("roles");
        write_role(
            &roles_dir,
            "web",
            "galaxy_info:\n  role_name: web\n  author: acme\n  description: d\n",
        );
        write_requirements(&roles_dir, "db", "roles:\n  - name: acme.web\n");

        let (cache, _) = CacheBuilder::new(&config).build(&search).unwrap();
        let compiler = ChartCompiler::new(&config, &cache);
        compiler.compile_all(&search).unwrap();
        let first = read_report(&roles_dir, "db");
        compiler.compile_all(&search).unwrap();
        let second = read_report(&roles_dir, "db");
        assert_eq!(first, second);
    }
}
