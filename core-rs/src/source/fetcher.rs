//! Remote registry retrieval

use crate::errors::{RegistryError, Result};
use reqwest::blocking::Client;
use std::fs;
use std::time::Duration;
use tracing::debug;

/// Retrieves the full registry body from a URL
///
/// Implementations block until the body is available. An empty body is a
/// failure: the registry cannot be built from nothing.
pub trait RegistryFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP(S) fetcher; `file://` URLs are read from disk
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("nsreg/{}", crate::VERSION))
            .build()
            .map_err(|e| RegistryError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn fetch_http(&self, url: &str) -> Result<String> {
        let failure = |reason: String| RegistryError::FetchFailure {
            url: url.to_string(),
            reason,
        };

        let response = self.client.get(url).send().map_err(|e| failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("HTTP status {}", status)));
        }

        response.text().map_err(|e| failure(e.to_string()))
    }
}

impl RegistryFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching registry");

        let body = match url.strip_prefix("file://") {
            Some(path) => fs::read_to_string(path).map_err(|e| RegistryError::FetchFailure {
                url: url.to_string(),
                reason: e.to_string(),
            })?,
            None => self.fetch_http(url)?,
        };

        if body.trim().is_empty() {
            return Err(RegistryError::FetchFailure {
                url: url.to_string(),
                reason: "empty response".to_string(),
            });
        }

        Ok(body)
    }
}
