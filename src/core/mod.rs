//! Core types shared across the tool.
//!
//! Currently this is the error taxonomy; every other module reports failures
//! through [`RoledocError`] or wraps them in `anyhow` context on the way up.

pub mod error;

pub use error::{ErrorContext, RoledocError, user_friendly_error};
