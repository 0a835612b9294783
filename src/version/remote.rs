//! `latest.json` over HTTP

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::FETCH_TIMEOUT_MS;
use crate::version::error::CheckError;
use crate::version::source::LatestSource;

/// Body of `latest.json`
#[derive(Debug, Deserialize)]
struct LatestDocument {
    latest: String,
}

/// Source implementation backed by a single JSON document
pub struct RemoteLatestSource {
    client: reqwest::Client,
    url: String,
}

impl RemoteLatestSource {
    /// Creates a source for the given URL with the default timeout
    pub fn new(url: &str) -> Result<Self, CheckError> {
        Self::with_timeout(url, Duration::from_millis(FETCH_TIMEOUT_MS))
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, CheckError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("results-page/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for RemoteLatestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteLatestSource")
            .field("url", &self.url)
            .finish()
    }
}

#[async_trait::async_trait]
impl LatestSource for RemoteLatestSource {
    async fn fetch_latest(&self) -> Result<String, CheckError> {
        debug!("Fetching latest version from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();

        if !status.is_success() {
            warn!("latest.json returned status {}: {}", status, self.url);
            return Err(CheckError::Status(status));
        }

        let body = response.text().await?;

        let document: LatestDocument = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse latest.json: {}", e);
            CheckError::InvalidResponse(e.to_string())
        })?;

        Ok(document.latest)
    }
}
