//! # roledoc
//!
//! Documents the dependency relationships of Ansible-style configuration
//! roles. The tool scans a set of role search paths, caches the metadata
//! declared in each role's `meta/main.yml`, resolves the dependencies each
//! role declares in `requirements.yml` against that cache, and merges the
//! rendered dependency chart into the role's blueprint document.
//!
//! # Architecture
//!
//! Two cooperating subsystems do the real work:
//!
//! - [`cache`] - the metadata cache builder: walks role directories,
//!   validates each manifest, and persists a lookup table under the user's
//!   home directory
//! - [`chart`] - the dependency chart compiler: reads each role's
//!   dependency manifest, resolves every declaration against the cache,
//!   and merges the rendered table into the role's document without
//!   touching unrelated content
//!
//! Around them sit narrow collaborators: [`discovery`] obtains the role
//! search paths from the Ansible configuration, [`scanner`] finds manifest
//! files, [`blueprint`] owns the non-destructive JSON merge, and
//! [`config`] carries the paths and patterns both subsystems share.
//!
//! # Example
//!
//! ```bash
//! # Build the metadata cache and generate every chart
//! roledoc dependencies
//!
//! # Scan explicit directories instead of the Ansible configuration
//! roledoc dependencies --roles-path /opt/playbooks/roles
//!
//! # Drop the cache so the next run rescans everything
//! roledoc cache clear
//! ```

pub mod blueprint;
pub mod cache;
pub mod chart;
pub mod cli;
pub mod config;
pub mod core;
pub mod discovery;
pub mod metadata;
pub mod scanner;
