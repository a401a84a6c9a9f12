//! Blueprint document resolution and non-destructive merge.
//!
//! Each role owns a JSON document (`package.json`) that collects generated
//! documentation fragments. The chart compiler contributes exactly one key,
//! `role_dependencies`; everything else in the document belongs to other
//! tools and must survive a merge untouched.
//!
//! The source document is picked from an explicit, ordered candidate list:
//!
//! 1. an existing `blueprint.role_dependencies/package.json` inside the role
//! 2. an existing `package.json` at the role root
//! 3. a fresh empty document
//!
//! Whichever source wins, the merged result is always written to the
//! blueprint-subdirectory copy, which is the canonical target.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::scanner;

/// Subdirectory of a role that holds the canonical merged document.
pub const BLUEPRINT_DIR: &str = "blueprint.role_dependencies";

/// File name of the per-role document.
pub const DOCUMENT_NAME: &str = "package.json";

/// The document key this tool owns. No other key is ever written.
pub const REPORT_KEY: &str = "role_dependencies";

/// Canonical path of a role's merged document.
#[must_use]
pub fn canonical_document_path(role_dir: &Path) -> PathBuf {
    role_dir.join(BLUEPRINT_DIR).join(DOCUMENT_NAME)
}

/// Pick the document to merge into, following the candidate precedence.
/// Falls back to the canonical path when no document exists yet.
#[must_use]
pub fn resolve_source_document(role_dir: &Path) -> PathBuf {
    let canonical = canonical_document_path(role_dir);
    if canonical.exists() {
        return canonical;
    }
    let root_doc = role_dir.join(DOCUMENT_NAME);
    if root_doc.exists() {
        return root_doc;
    }
    canonical
}

/// Load a JSON object from `path`, degrading to an empty object when the
/// file is absent, unreadable, malformed, or not a JSON object.
fn load_document(path: &Path) -> Map<String, Value> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Map::new();
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            debug!("treating malformed document {} as empty", path.display());
            Map::new()
        }
    }
}

/// Merge a dependency report into a role's document and write the result
/// to the canonical blueprint path.
///
/// Every key other than `role_dependencies` is preserved. Returns the path
/// the merged document was written to.
pub fn merge_report(role_dir: &Path, report: &Value) -> Result<PathBuf> {
    let source = resolve_source_document(role_dir);
    let mut document = load_document(&source);
    document.insert(REPORT_KEY.to_string(), report.clone());

    let target = canonical_document_path(role_dir);
    scanner::write_json_file(&target, &Value::Object(document))
        .with_context(|| format!("failed to write merged document for {}", role_dir.display()))?;
    Ok(target)
}
