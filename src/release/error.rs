use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Invalid version {version:?}: {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
