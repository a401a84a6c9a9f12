//! Rendering resolved role metadata into chart cells.
//!
//! Each dependency becomes a 4-column row: a link to the role's Galaxy
//! page, its description, a strip of supported-OS icons, and a status
//! badge. Cells are small HTML fragments because the consuming documents
//! embed them directly in rendered tables.

use crate::config::Config;
use crate::core::RoledocError;
use crate::metadata::RoleMetadata;

/// One rendered chart row: link, description, supported OSes, status.
pub type DependencyRow = [String; 4];

/// Fixed OS icon set. Platform names from role manifests are matched by
/// lowercase substring, in declaration order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsIcon {
    Arch,
    Centos,
    Debian,
    Fedora,
    Freebsd,
    Macos,
    Ubuntu,
    Windows,
}

impl OsIcon {
    /// Match a platform name to an icon. `el` covers Enterprise Linux
    /// spellings such as `EL` and `RHEL`.
    #[must_use]
    pub fn from_platform_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.contains("arch") {
            Some(Self::Arch)
        } else if name.contains("centos") || name.contains("el") {
            Some(Self::Centos)
        } else if name.contains("debian") {
            Some(Self::Debian)
        } else if name.contains("fedora") {
            Some(Self::Fedora)
        } else if name.contains("freebsd") {
            Some(Self::Freebsd)
        } else if name.contains("mac") {
            Some(Self::Macos)
        } else if name.contains("ubuntu") {
            Some(Self::Ubuntu)
        } else if name.contains("windows") {
            Some(Self::Windows)
        } else {
            None
        }
    }

    /// Icon file name within the icon set.
    #[must_use]
    pub const fn file(self) -> &'static str {
        match self {
            Self::Arch => "archlinux.png",
            Self::Centos => "centos.png",
            Self::Debian => "debian.png",
            Self::Fedora => "fedora.png",
            Self::Freebsd => "freebsd.png",
            Self::Macos => "macos.png",
            Self::Ubuntu => "ubuntu.png",
            Self::Windows => "windows.png",
        }
    }
}

/// Render the full row for a dependency resolved from the cache.
///
/// # Errors
///
/// Returns [`RoledocError::RoleMetadataError`] when the metadata is missing
/// the fields the link needs or declares an unrecognized platform. Callers
/// catch this at the per-role level; it never aborts the batch.
pub fn dependency_row(
    config: &Config,
    metadata: &RoleMetadata,
    declaration: &str,
) -> Result<DependencyRow, RoledocError> {
    Ok([
        dependency_link(config, metadata, declaration)?,
        dependency_description(metadata),
        supported_os_icons(config, metadata, declaration)?,
        dependency_status(metadata),
    ])
}

/// Fully degraded row for a dependency with no cache entry: the bare
/// declaration as the label, no description or icons, and an
/// `Unavailable` status.
#[must_use]
pub fn unresolved_row(declaration: &str) -> DependencyRow {
    [
        declaration.to_string(),
        String::new(),
        String::new(),
        "Unavailable".to_string(),
    ]
}

/// Anchor linking the dependency to its Galaxy page.
fn dependency_link(
    config: &Config,
    metadata: &RoleMetadata,
    declaration: &str,
) -> Result<String, RoledocError> {
    let (Some(namespace), Some(role_name)) = (&metadata.namespace, &metadata.role_name) else {
        return Err(RoledocError::RoleMetadataError {
            role: declaration.to_string(),
            reason: "can not generate dependency link without namespace and role name".to_string(),
        });
    };

    Ok(format!(
        "<a href=\"{}\" title=\"{namespace}.{role_name} on Ansible Galaxy\" target=\"_blank\">{namespace}.{role_name}</a>",
        config.galaxy_role_url(namespace, role_name)
    ))
}

/// Description cell; empty when the metadata carries none.
fn dependency_description(metadata: &RoleMetadata) -> String {
    metadata.description.clone().unwrap_or_default()
}

/// Concatenated icon strip for every platform the role supports.
///
/// Icons link to the repository's supported-operating-systems anchor when a
/// repository URL is known.
fn supported_os_icons(
    config: &Config,
    metadata: &RoleMetadata,
    declaration: &str,
) -> Result<String, RoledocError> {
    let mut icons = Vec::with_capacity(metadata.platforms.len());

    for platform in &metadata.platforms {
        let icon = OsIcon::from_platform_name(&platform.name).ok_or_else(|| {
            RoledocError::RoleMetadataError {
                role: declaration.to_string(),
                reason: format!("could not find icon for platform {}", platform.name),
            }
        })?;

        let img = config.icon_url(icon.file());
        if let Some(repository) = &metadata.repository {
            icons.push(format!(
                "<img src=\"{img}\" href=\"{repository}#supported-operating-systems\" target=\"_blank\" />"
            ));
        } else {
            icons.push(format!("<img src=\"{img}\" target=\"_blank\" />"));
        }
    }

    Ok(icons.concat())
}

/// Status cell: the repository status badge, linked to the repository when
/// one is known, or the literal `Unavailable`.
fn dependency_status(metadata: &RoleMetadata) -> String {
    let Some(status) = &metadata.repository_status else {
        return "Unavailable".to_string();
    };

    let img = format!("<img src=\"{status}\" />");
    let Some(repository) = &metadata.repository else {
        return img;
    };

    let namespace = metadata.namespace.as_deref().unwrap_or_default();
    let role_name = metadata.role_name.as_deref().unwrap_or_default();
    format!(
        "<a href=\"{repository}\" title=\"{namespace}.{role_name}'s repository\" target=\"_blank\">{img}</a>"
    )
}
