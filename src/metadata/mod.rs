//! Role metadata extraction from role manifests.
//!
//! Every role carries a manifest at `meta/main.yml` whose `galaxy_info`
//! section describes it: display name, author, description, and optionally
//! the platforms it supports and where its repository lives. This module
//! parses that manifest into [`RoleMetadata`] and enforces the three
//! required fields; everything else is enrichment used only when rendering
//! chart rows.

use crate::core::RoledocError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A platform a role declares support for, e.g. `{ name: "Ubuntu" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Platform name as written in the manifest
    pub name: String,
}

/// Validated metadata for one role.
///
/// `role_name`, `namespace`, and `description` are always present on
/// entries produced by [`parse_role_manifest`]; the `Default` value (all
/// fields empty) is what an unresolved dependency degrades to, which is why
/// they are modeled as `Option` rather than `String`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleMetadata {
    /// Display name of the role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    /// Authoring entity, sourced from the manifest's `author` field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Platforms the role supports, in manifest order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<Platform>,
    /// Repository URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Badge image URL describing the repository's status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_status: Option<String>,
}

/// Raw shape of a role manifest file. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RoleManifest {
    galaxy_info: Option<GalaxyInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct GalaxyInfo {
    role_name: Option<String>,
    author: Option<String>,
    description: Option<String>,
    #[serde(default)]
    platforms: Vec<Platform>,
    repository: Option<String>,
    repository_status: Option<String>,
}

/// Parse a role manifest file into validated [`RoleMetadata`].
///
/// `role` is the label used in error messages, typically
/// `<search path>/<role short name>`.
///
/// # Errors
///
/// Returns [`RoledocError::MetaYamlError`] when the file cannot be read,
/// is not valid YAML, lacks a `galaxy_info` section, or is missing any of
/// the required `role_name`, `author`, or `description` fields.
pub fn parse_role_manifest(path: &Path, role: &str) -> Result<RoleMetadata, RoledocError> {
    let content = std::fs::read_to_string(path).map_err(|e| RoledocError::MetaYamlError {
        role: role.to_string(),
        reason: format!("could not read {}: {e}", path.display()),
    })?;

    let manifest: RoleManifest =
        serde_yaml::from_str(&content).map_err(|e| RoledocError::MetaYamlError {
            role: role.to_string(),
            reason: format!("invalid YAML: {e}"),
        })?;

    let info = manifest
        .galaxy_info
        .ok_or_else(|| RoledocError::MetaYamlError {
            role: role.to_string(),
            reason: "missing galaxy_info section".to_string(),
        })?;

    for (field, value) in [
        ("role_name", &info.role_name),
        ("author", &info.author),
        ("description", &info.description),
    ] {
        if value.as_deref().is_none_or(str::is_empty) {
            return Err(RoledocError::MetaYamlError {
                role: role.to_string(),
                reason: format!("missing required field '{field}'"),
            });
        }
    }

    Ok(RoleMetadata {
        role_name: info.role_name,
        namespace: info.author,
        description: info.description,
        platforms: info.platforms,
        repository: info.repository,
        repository_status: info.repository_status,
    })
}

/// Derive a role's short name from a manifest path found under a search
/// path.
///
/// Strips the search-path prefix and the fixed manifest suffix, then trims
/// path separators, so `/roles` + `/roles/web/meta/main.yml` +
/// `meta/main.yml` yields `web`. The same rule covers dependency manifests
/// with the `requirements.yml` suffix.
#[must_use]
pub fn role_short_name(search_path: &str, file_path: &Path, suffix: &str) -> String {
    let full = file_path.to_string_lossy().replace('\\', "/");
    let trimmed = full
        .strip_suffix(suffix)
        .unwrap_or(&full)
        .strip_prefix(search_path)
        .unwrap_or(&full)
        .to_string();
    trimmed.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_manifest(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let temp = tempdir().unwrap();
        let path = temp.path().join("main.yml");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    #[test]
    fn test_parse_valid_manifest() {
        let (_temp, path) = write_manifest(
            "galaxy_info:\n  role_name: web\n  author: acme\n  description: Web server\n  platforms:\n    - name: Ubuntu\n",
        );
        let meta = parse_role_manifest(&path, "/roles/web").unwrap();
        assert_eq!(meta.role_name.as_deref(), Some("web"));
        assert_eq!(meta.namespace.as_deref(), Some("acme"));
        assert_eq!(meta.description.as_deref(), Some("Web server"));
        assert_eq!(meta.platforms, vec![Platform { name: "Ubuntu".to_string() }]);
        assert!(meta.repository.is_none());
    }

    #[test]
    fn test_parse_manifest_missing_galaxy_info() {
        let (_temp, path) = write_manifest("dependencies: []\n");
        let err = parse_role_manifest(&path, "/roles/web").unwrap_err();
        match err {
            RoledocError::MetaYamlError { role, reason } => {
                assert_eq!(role, "/roles/web");
                assert!(reason.contains("galaxy_info"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_manifest_missing_each_required_field() {
        for missing in ["role_name", "author", "description"] {
            let mut lines = vec!["galaxy_info:".to_string()];
            for field in ["role_name", "author", "description"] {
                if field != missing {
                    lines.push(format!("  {field}: value"));
                }
            }
            let (_temp, path) = write_manifest(&lines.join("\n"));
            let err = parse_role_manifest(&path, "role").unwrap_err();
            match err {
                RoledocError::MetaYamlError { reason, .. } => {
                    assert!(reason.contains(missing), "expected {missing} in: {reason}");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_parse_manifest_enrichment_fields() {
        let (_temp, path) = write_manifest(
            "galaxy_info:\n  role_name: web\n  author: acme\n  description: d\n  repository: https://x\n  repository_status: https://img\n",
        );
        let meta = parse_role_manifest(&path, "role").unwrap();
        assert_eq!(meta.repository.as_deref(), Some("https://x"));
        assert_eq!(meta.repository_status.as_deref(), Some("https://img"));
    }

    #[test]
    fn test_role_short_name() {
        let name = role_short_name(
            "/roles",
            Path::new("/roles/web/meta/main.yml"),
            "meta/main.yml",
        );
        assert_eq!(name, "web");
    }

    #[test]
    fn test_role_short_name_requirements() {
        let name = role_short_name(
            "/opt/Playbooks/roles/services",
            Path::new("/opt/Playbooks/roles/services/db/requirements.yml"),
            "requirements.yml",
        );
        assert_eq!(name, "db");
    }

    #[test]
    fn test_role_short_name_nested_role() {
        let name = role_short_name(
            "/roles",
            Path::new("/roles/group/web/meta/main.yml"),
            "meta/main.yml",
        );
        assert_eq!(name, "group/web");
    }

    #[test]
    fn test_metadata_serializes_without_empty_fields() {
        let meta = RoleMetadata {
            role_name: Some("web".to_string()),
            namespace: Some("acme".to_string()),
            description: Some("Web server".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(!json.contains("platforms"));
        assert!(!json.contains("repository"));
    }
}
