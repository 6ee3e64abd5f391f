//! Page fetching — the upstream side of the pipeline.
//!
//! The PageFetcher trait abstracts over the HTTP client so the pipeline can
//! run against canned markup in tests. Transport failures are hard errors:
//! they abort the run before any state mutation, so the next scheduled tick
//! retries cleanly.

use std::time::Duration;

use thiserror::Error;

/// Errors from fetching the league table page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("GET {url} returned HTTP {status}")]
    BadStatus { url: String, status: u16 },
}

/// Source of raw page markup.
pub trait PageFetcher {
    /// Fetch the raw body for `url`.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher with an explicit timeout.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tablewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
