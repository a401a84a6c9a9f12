//! Role search path discovery.
//!
//! Role directories are not configured anywhere the tool owns; they come
//! from the Ansible configuration. [`get_default_roles`] runs
//! `ansible-config dump` and keeps the `DEFAULT_ROLES_PATH` line, and
//! [`parse_default_roles`] extracts the bracketed directory list out of
//! that line. The dump line looks like:
//!
//! ```text
//! DEFAULT_ROLES_PATH(/opt/Playbooks/ansible.cfg) = ['/opt/Playbooks/roles/applications', '/etc/ansible/roles']
//! ```
//!
//! Everything downstream (cache build, chart compilation) operates on the
//! parsed list, so tests and callers that already know their role
//! directories can skip this module entirely.

use crate::core::RoledocError;
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

/// Marker expected in the configuration dump output.
const ROLES_PATH_KEY: &str = "DEFAULT_ROLES_PATH";

/// Regex matching the bracketed search path list inside the dump line.
const ROLES_PATTERN: &str = r"\[.*\]";

/// Run `ansible-config dump` and return the line declaring the default
/// role search paths.
///
/// # Errors
///
/// Returns [`RoledocError::CommandNotFound`] when the executable is not on
/// the `PATH`, when it cannot be spawned, or when its output does not
/// contain the `DEFAULT_ROLES_PATH` marker. There is nothing to scan
/// without this output, so callers treat the error as fatal.
pub async fn get_default_roles() -> Result<String, RoledocError> {
    let command = "ansible-config";

    // Fail fast with a clear message instead of a spawn error.
    if which::which(command).is_err() {
        return Err(RoledocError::CommandNotFound {
            command: format!("{command} dump"),
        });
    }

    let output = Command::new(command)
        .arg("dump")
        .output()
        .await
        .map_err(|_| RoledocError::CommandNotFound {
            command: format!("{command} dump"),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    debug!("ansible-config dump produced {} bytes", stdout.len());

    let line = stdout
        .lines()
        .find(|line| line.contains(ROLES_PATH_KEY))
        .map(|line| line.trim().to_string());

    line.ok_or_else(|| RoledocError::CommandNotFound {
        command: format!("{command} dump"),
    })
}

/// Parse the role search paths out of a raw `DEFAULT_ROLES_PATH` line.
///
/// Extracts the bracketed segment, strips brackets and single quotes,
/// splits on commas, and trims each element. Order is preserved.
///
/// # Errors
///
/// Returns [`RoledocError::RolesParseError`] when the input contains no
/// bracketed list.
pub fn parse_default_roles(default_roles: &str) -> Result<Vec<String>, RoledocError> {
    let pattern = Regex::new(ROLES_PATTERN).expect("roles pattern is valid");

    let matched = pattern
        .find(default_roles)
        .ok_or_else(|| RoledocError::RolesParseError {
            output: default_roles.to_string(),
        })?;

    let inner = matched
        .as_str()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .replace('\'', "");

    Ok(inner
        .split(',')
        .map(|role| role.trim().to_string())
        .filter(|role| !role.is_empty())
        .collect())
}
