//! Page fetching for index pages

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{FETCH_TIMEOUT_MS, USER_AGENT};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Trait for fetching the raw text of a page
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page body at `url`
    ///
    /// # Returns
    /// * `Ok(String)` - The decoded response body
    /// * `Err(FetchError)` - Transport failure or a non-success status
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// PageFetcher backed by a reqwest client
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Server returned status {}: {}", status, url);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_page_returns_body_on_success() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/Keenspace_A.html")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>index</html>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher
            .fetch_page(&format!("{}/Keenspace_A.html", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, "<html>index</html>");
    }

    #[tokio::test]
    async fn fetch_page_returns_status_error_for_not_found() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/Keenspace_Q.html")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher
            .fetch_page(&format!("{}/Keenspace_Q.html", server.url()))
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }
}
