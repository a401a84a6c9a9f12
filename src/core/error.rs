//! Error handling for roledoc
//!
//! This module provides the error types and user-friendly error reporting for
//! the role documentation tool. The error system is designed around two core
//! principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! Errors fall into the taxonomy the tool's failure semantics are built on:
//! - **Environment**: [`RoledocError::CommandNotFound`] - the role
//!   introspection tool is missing or produced unexpected output. Fatal to
//!   the whole invocation.
//! - **Structural parse**: [`RoledocError::RolesParseError`],
//!   [`RoledocError::MetaYamlError`] - an artifact does not match its
//!   expected shape. A bad search-path string aborts the run; a bad role
//!   manifest only removes that role's contribution.
//! - **Resolution**: [`RoledocError::RoleMetadataError`] - a dependency's
//!   metadata cannot be rendered. Recovered per role; the batch continues.
//! - **I/O and serialization**: conversions from [`std::io::Error`],
//!   [`serde_json::Error`], and [`serde_yaml::Error`].
//!
//! Use [`user_friendly_error`] to convert any error into a displayable
//! format with contextual suggestions.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for roledoc operations.
///
/// Each variant represents a specific failure mode and carries the context
/// needed to report it: the command that was missing, the role whose manifest
/// was invalid, the output that failed to parse.
#[derive(Error, Debug)]
pub enum RoledocError {
    /// The external role-introspection command is not installed, or its
    /// output did not contain the expected marker.
    #[error("could not run '{command}'")]
    CommandNotFound {
        /// The command that could not be executed
        command: String,
    },

    /// The role search path dump did not contain a bracketed path list.
    #[error("couldn't parse roles from: {output}")]
    RolesParseError {
        /// The raw output that failed to parse
        output: String,
    },

    /// A role manifest is missing its metadata section or one of the
    /// required fields (role name, author, description).
    #[error("invalid meta/main.yml in: {role}: {reason}")]
    MetaYamlError {
        /// The role whose manifest is invalid
        role: String,
        /// What was missing or malformed
        reason: String,
    },

    /// A dependency's resolved metadata cannot be rendered into a chart row.
    #[error("role metadata error for {role}: {reason}")]
    RoleMetadataError {
        /// The dependency declaration or role being rendered
        role: String,
        /// Why rendering failed
        reason: String,
    },

    /// No role manifest under any search path produced a valid cache entry,
    /// even though candidate manifests were found.
    #[error("no valid role metadata found ({candidates} manifest(s) scanned, all failed)")]
    NoValidRoles {
        /// How many candidate manifests were scanned
        candidates: usize,
    },

    /// A standard I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Wrapper that pairs an error with a user-facing suggestion and details.
///
/// Built by [`user_friendly_error`] just before display; commands propagate
/// plain errors and only the binary's entry point constructs one of these.
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// A one-line hint about how to resolve the problem
    pub suggestion: Option<String>,
    /// Additional background about why the error occurred
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach a resolution hint shown to the user after the error message.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach background details shown between the message and the hint.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with color when the terminal supports it.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);
        if let Some(details) = &self.details {
            eprintln!("  {details}");
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("{} {}", "hint:".yellow().bold(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\n  {details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nhint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a contextual suggestion.
///
/// Known [`RoledocError`] variants get targeted hints; everything else is
/// passed through unchanged.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let (suggestion, details) = match error.downcast_ref::<RoledocError>() {
        Some(RoledocError::CommandNotFound { command }) => (
            Some(format!(
                "install Ansible so '{command}' is on your PATH, or pass --roles-path to scan explicit directories"
            )),
            Some("role search paths are discovered by running the Ansible configuration dump".to_string()),
        ),
        Some(RoledocError::RolesParseError { .. }) => (
            Some("check that DEFAULT_ROLES_PATH is set to a list of directories in your Ansible configuration".to_string()),
            None,
        ),
        Some(RoledocError::MetaYamlError { .. }) => (
            Some("ensure the manifest has a galaxy_info section with role_name, author, and description".to_string()),
            None,
        ),
        Some(RoledocError::NoValidRoles { .. }) => (
            Some("fix the role manifests reported above, or point --roles-path at directories containing valid roles".to_string()),
            None,
        ),
        _ => (None, None),
    };

    ErrorContext {
        error,
        suggestion,
        details,
    }
}
