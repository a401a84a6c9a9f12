//! File system scanning and serialization helpers.
//!
//! Both subsystems locate their inputs the same way: walk a role search
//! path, match each file's relative path against a glob, and keep the hits.
//! [`find_files`] is that single scanning primitive; the rest of the module
//! is thin read/write helpers for the YAML manifests and JSON documents the
//! tool consumes and produces.

use anyhow::{Context, Result};
use glob::Pattern;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::trace;
use walkdir::WalkDir;

/// One file matched during a scan: its full path and modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundFile {
    /// Absolute (or search-path-relative) path of the match
    pub path: PathBuf,
    /// Last modification time reported by the file system
    pub modified: SystemTime,
}

/// Recursively find files under `dir` whose path relative to `dir` matches
/// the glob `pattern`.
///
/// Only regular files are returned, in directory-walk order. A missing or
/// non-directory `dir` yields an empty result rather than an error: a role
/// search path that does not exist simply contributes no roles.
pub fn find_files(dir: &Path, pattern: &str) -> Result<Vec<FoundFile>> {
    if !dir.is_dir() {
        trace!("skipping non-directory search path: {}", dir.display());
        return Ok(Vec::new());
    }

    let matcher = Pattern::new(pattern)
        .with_context(|| format!("invalid glob pattern: {pattern}"))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        // Globs are written with forward slashes; normalize for Windows.
        let candidate = relative.to_string_lossy().replace('\\', "/");
        if matcher.matches(&candidate) {
            let modified = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            files.push(FoundFile {
                path: entry.path().to_path_buf(),
                modified,
            });
        }
    }

    Ok(files)
}

/// Ensure a directory exists, creating it and all parents if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        anyhow::bail!("path exists but is not a directory: {}", path.display());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

/// Read and deserialize a YAML file.
pub fn read_yaml_file<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse YAML file: {}", path.display()))
}

/// Read and deserialize a JSON file.
pub fn read_json_file<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON file: {}", path.display()))
}

/// Serialize a value as pretty-printed JSON and write it, creating parent
/// directories as needed.
pub fn write_json_file<T>(path: &Path, data: &T) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let content = serde_json::to_string_pretty(data)
        .with_context(|| format!("failed to serialize JSON for: {}", path.display()))?;
    fs::write(path, content)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_find_files_matches_glob() {
        let temp = tempdir().unwrap();
        let meta = temp.path().join("web").join("meta");
        fs::create_dir_all(&meta).unwrap();
        fs::write(meta.join("main.yml"), "galaxy_info: {}").unwrap();
        fs::write(temp.path().join("web").join("README.md"), "hi").unwrap();

        let found = find_files(temp.path(), "**/meta/main.yml").unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].path.ends_with("web/meta/main.yml"));
    }

    #[test]
    fn test_find_files_missing_dir_is_empty() {
        let found = find_files(Path::new("/definitely/not/here"), "**/*.yml").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_files_skips_directories() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("requirements.yml")).unwrap();

        let found = find_files(temp.path(), "**/requirements.yml").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_ensure_dir_nested() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("a").join("b").join("c");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op.
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_json_round_trip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("deep").join("data.json");
        let value = serde_json::json!({"foo": "bar"});

        write_json_file(&path, &value).unwrap();
        let back: serde_json::Value = read_json_file(&path).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_read_yaml_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("x.yml");
        fs::write(&path, "roles:\n  - name: acme.web\n").unwrap();

        let value: serde_yaml::Value = read_yaml_file(&path).unwrap();
        assert!(value.get("roles").is_some());
    }
}
