//! GitHub Releases API source for the latest release descriptor

#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use tracing::warn;

use crate::config::USER_AGENT;
use crate::release::error::ReleaseError;

/// Latest release as published by the GitHub Releases API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReleaseDescriptor {
    pub tag_name: String,
    pub tarball_url: Option<String>,
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReleaseAsset {
    pub content_type: String,
    pub browser_download_url: String,
}

/// Trait for fetching the latest release descriptor
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<ReleaseDescriptor, ReleaseError>;
}

/// ReleaseSource reading a fixed `releases/latest` endpoint
pub struct GitHubReleaseSource {
    client: reqwest::Client,
    endpoint: String,
}

impl GitHubReleaseSource {
    pub fn new(endpoint: &str) -> Result<Self, ReleaseError> {
        Ok(Self {
            client: reqwest::Client::builder().user_agent(USER_AGENT).build()?,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubReleaseSource {
    async fn fetch_latest(&self) -> Result<ReleaseDescriptor, ReleaseError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, self.endpoint);
            return Err(ReleaseError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub release response: {}", e);
            ReleaseError::InvalidResponse(e.to_string())
        })
    }
}
