//! Source trait for fetching the latest published version

#[cfg(test)]
use mockall::automock;

use crate::version::error::CheckError;

/// Trait for fetching the latest version from a remote document
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait LatestSource: Send + Sync {
    /// Fetches the `latest` version string
    ///
    /// # Returns
    /// * `Ok(String)` - The version string as published, not yet validated
    /// * `Err(CheckError)` - If the fetch fails or the document is malformed
    async fn fetch_latest(&self) -> Result<String, CheckError>;
}
