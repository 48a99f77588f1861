//! Update status resolution against the latest published release

use std::cmp::Ordering;
use std::fmt;

use semver::Version;
use tracing::{debug, warn};

use crate::config::ReleaseConfig;
use crate::release::error::ReleaseError;
use crate::release::github::{ReleaseDescriptor, ReleaseSource};
use crate::release::semver::parse_strict;

/// Platform family, which decides what kind of download is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Ships a native installer
    Windows,
    /// Gets the source tarball
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

/// Update status of the local installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Remote release metadata could not be fetched or parsed
    Unknown(String),
    /// Local version equals the remote version exactly
    UpToDate,
    /// Remote release is strictly newer
    UpdateAvailable {
        version: String,
        asset_url: Option<String>,
    },
    /// Local build is not older than the remote release (development or pre-release)
    AheadOfRemote { version: String },
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStatus::Unknown(reason) => {
                write!(f, "Could not determine the latest version: {}", reason)
            }
            UpdateStatus::UpToDate => write!(f, "You have the latest version."),
            UpdateStatus::UpdateAvailable {
                version,
                asset_url: Some(url),
            } => write!(f, "A new version {} is available at {}", version, url),
            UpdateStatus::UpdateAvailable {
                version,
                asset_url: None,
            } => write!(f, "A new version {} is available.", version),
            UpdateStatus::AheadOfRemote { version } => write!(
                f,
                "Your version is newer than the latest release {}.",
                version
            ),
        }
    }
}

/// Fetch the latest release and classify `local_version` against it.
///
/// `Err` is returned only when the release descriptor could not be fetched
/// or parsed, including a tag that is not strict semver. A local version
/// that is not strict semver (development snapshots) is never an error and
/// resolves to `AheadOfRemote`.
pub async fn resolve(
    source: &dyn ReleaseSource,
    local_version: &str,
    platform: Platform,
    config: &ReleaseConfig,
) -> Result<UpdateStatus, ReleaseError> {
    let release = source.fetch_latest().await?;
    let candidate = parse_strict(&release.tag_name).map_err(|e| {
        warn!("Latest release has an unusable tag: {}", e);
        ReleaseError::InvalidResponse(e.to_string())
    })?;
    let asset_url = select_asset(&release, platform, config);
    Ok(classify(local_version, &candidate, release.tag_name, asset_url))
}

/// Like [`resolve`], folding fetch failures into `UpdateStatus::Unknown`.
pub async fn check_update(
    source: &dyn ReleaseSource,
    local_version: &str,
    platform: Platform,
    config: &ReleaseConfig,
) -> UpdateStatus {
    match resolve(source, local_version, platform, config).await {
        Ok(status) => status,
        Err(e) => {
            warn!("Failed to check for updates: {}", e);
            UpdateStatus::Unknown(e.to_string())
        }
    }
}

fn select_asset(
    release: &ReleaseDescriptor,
    platform: Platform,
    config: &ReleaseConfig,
) -> Option<String> {
    match platform {
        Platform::Windows => Some(
            release
                .assets
                .iter()
                .find(|asset| asset.content_type == config.installer_content_type)
                .map(|asset| asset.browser_download_url.clone())
                .unwrap_or_else(|| config.fallback_url.clone()),
        ),
        Platform::Other => release.tarball_url.clone(),
    }
}

fn classify(
    local_version: &str,
    candidate: &Version,
    tag: String,
    asset_url: Option<String>,
) -> UpdateStatus {
    if tag == local_version {
        return UpdateStatus::UpToDate;
    }

    let candidate_is_newer = match parse_strict(local_version) {
        Ok(local) => candidate.cmp_precedence(&local) == Ordering::Greater,
        Err(e) => {
            debug!("Treating {} as not newer: {}", tag, e);
            false
        }
    };

    if candidate_is_newer {
        UpdateStatus::UpdateAvailable {
            version: tag,
            asset_url,
        }
    } else {
        UpdateStatus::AheadOfRemote { version: tag }
    }
}
