//! Blocking HTTP access shared by the detail fetcher and raster downloads

use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;

/// Errors raised while talking to a remote endpoint
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to read response: {0}")]
    Body(String),
}

/// Retrieves raw bytes for a URL, fully buffered in memory
pub trait AssetFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Build the blocking client used for every Icons8 request
pub fn build_client(config: &ApiConfig) -> Result<reqwest::blocking::Client, FetchError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent())
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))
}

/// GET a URL and fail on any non-success status
pub(crate) fn get_checked(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<reqwest::blocking::Response, FetchError> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| FetchError::Request(e.to_string()))?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }
    Ok(response)
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        log::debug!("Fetching {}", url);
        get_checked(&self.client, url)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}
