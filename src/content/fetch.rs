//! HTTP fetch seam for the content origin.
//!
//! The store talks to the origin through the `Fetch` trait so tests can
//! substitute an in-memory fetcher. The real implementation is a thin
//! wrapper over `reqwest`.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single fetch attempt
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

/// A source of resource bodies, addressed by URL
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch the body at `url` as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetcher backed by a real HTTP client
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with a fresh client
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
