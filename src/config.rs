//! Runtime configuration for both subsystems.
//!
//! The original tool kept the cache location and the scan patterns as
//! module-level globals. Here they live in a single [`Config`] value that is
//! constructed once by the CLI and passed by reference to the cache builder
//! and the chart compiler, so tests can point everything at a temp
//! directory without touching process state.

use std::path::PathBuf;

/// File name of the persisted metadata cache inside [`Config::cache_dir`].
pub const CACHE_FILE_NAME: &str = "role_metadata.json";

/// Glob matched against role directories to find role manifests.
pub const META_PATTERN: &str = "**/meta/main.yml";

/// Glob matched against role directories to find dependency manifests.
pub const REQUIREMENTS_PATTERN: &str = "**/requirements.yml";

/// Settings shared by the cache builder and the chart compiler.
///
/// Everything that was ambient state in the original implementation:
/// where the cache lives, which globs identify the two manifest kinds, and
/// the endpoints rendered into chart cells.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted metadata cache
    pub cache_dir: PathBuf,
    /// Glob for role manifests, relative to each search path
    pub meta_pattern: String,
    /// Glob for dependency manifests, relative to each search path
    pub requirements_pattern: String,
    /// Base URL for role pages linked from chart rows
    pub galaxy_url: String,
    /// Base URL for the supported-OS icon set
    pub icon_base_url: String,
}

impl Config {
    /// Build a configuration rooted at the default, user-home-relative
    /// cache directory (`~/.local/roledoc/`).
    ///
    /// Falls back to a relative `.roledoc` directory when no home directory
    /// can be determined, which only happens in stripped-down environments.
    #[must_use]
    pub fn new() -> Self {
        let cache_dir = dirs::home_dir()
            .map_or_else(|| PathBuf::from(".roledoc"), |home| home.join(".local").join("roledoc"));
        Self::with_cache_dir(cache_dir)
    }

    /// Build a configuration with an explicit cache directory.
    ///
    /// Used by the `--cache-dir` flag and by every test that needs an
    /// isolated cache.
    #[must_use]
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            meta_pattern: META_PATTERN.to_string(),
            requirements_pattern: REQUIREMENTS_PATTERN.to_string(),
            galaxy_url: "https://galaxy.ansible.com".to_string(),
            icon_base_url: "https://gitlab.com/megabyte-labs/assets/-/raw/master/icon".to_string(),
        }
    }

    /// Full path of the persisted metadata cache file.
    #[must_use]
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE_NAME)
    }

    /// Icon URL for a given icon file name.
    #[must_use]
    pub fn icon_url(&self, file: &str) -> String {
        format!("{}/{}", self.icon_base_url, file)
    }

    /// Galaxy page URL for a namespace/role pair.
    #[must_use]
    pub fn galaxy_role_url(&self, namespace: &str, role_name: &str) -> String {
        format!("{}/{}/{}", self.galaxy_url, namespace, role_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
