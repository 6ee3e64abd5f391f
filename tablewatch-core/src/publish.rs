//! Webhook publishing — the downstream side of the pipeline.
//!
//! The Publisher trait mirrors PageFetcher: a seam for tests, with the
//! blocking webhook client as the production implementation. The webhook URL
//! is a constructor argument, never ambient global state, so the pipeline is
//! testable without environment mutation.

use std::time::Duration;

use serde_json::json;
use thiserror::Error;

/// Errors from delivering the formatted message.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("webhook request failed: {0}")]
    Transport(String),

    #[error("webhook returned HTTP {status}")]
    BadStatus { status: u16 },
}

/// Destination for the formatted standings message.
pub trait Publisher {
    /// Deliver `content`. Returns only after the endpoint confirmed receipt.
    fn publish(&self, content: &str) -> Result<(), PublishError>;
}

/// Discord-compatible webhook publisher: POSTs `{"content": ...}` JSON.
pub struct WebhookPublisher {
    client: reqwest::blocking::Client,
    webhook_url: String,
}

impl WebhookPublisher {
    pub fn new(webhook_url: String, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tablewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            webhook_url,
        }
    }
}

impl Publisher for WebhookPublisher {
    fn publish(&self, content: &str) -> Result<(), PublishError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&json!({ "content": content }))
            .send()
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::BadStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
