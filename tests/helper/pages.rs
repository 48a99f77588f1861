//! Index page test utilities

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use stripscan::fetch::{FetchError, PageFetcher};

/// Fetcher serving canned pages; unknown URLs fail with 404
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    requests: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Render one index entry the way the guide pages do
pub fn index_entry(url: &str, name: &str, days: u64) -> String {
    format!(
        concat!(
            r#"<div class="comictitle"><strong><a target="_blank" "#,
            r#"onclick="pageTrackerCG._link('{url}'); return false;" href="{url}">{name}</a>"#,
            "</strong></div>\n<div class=\"comicinfo\">Number of Days: {days}</div>\n"
        ),
        url = url,
        name = name,
        days = days
    )
}

/// Wrap entries into a full index page
pub fn index_page(entries: &[String]) -> String {
    format!("<html><body>\n{}</body></html>\n", entries.concat())
}
