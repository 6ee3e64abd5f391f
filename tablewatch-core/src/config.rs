//! Configuration — TOML file with env fallback for the webhook secret.
//!
//! Every field has a default matching the original deployment (SNL league
//! table, Monday 18:00–18:10 Europe/London), so a config file is only needed
//! to override. The webhook URL is the one required value: it may come from
//! the file or from `DISCORD_WEBHOOK_URL`, and its absence is a startup
//! error raised before any collaborator is constructed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::period::PostWindow;

/// Environment variable consulted when the config file omits `webhook_url`.
pub const WEBHOOK_ENV_VAR: &str = "DISCORD_WEBHOOK_URL";

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("invalid config file {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("no webhook URL: set `webhook_url` in the config file or the {WEBHOOK_ENV_VAR} environment variable")]
    MissingWebhook,

    #[error("invalid post window: {reason}")]
    InvalidWindow { reason: String },
}

/// Full configuration surface for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    /// Page holding the league standings table.
    pub league_url: String,
    /// Webhook endpoint for the weekly post. Required; see [`ConfigError::MissingWebhook`].
    pub webhook_url: Option<String>,
    /// Case-insensitive substring identifying the team of interest.
    pub team_query: String,
    /// Title embedded in the message's first line.
    pub title: String,
    /// Target time zone for the window check, period key, and timestamp.
    pub timezone: Tz,
    /// Weekly posting window in the target zone.
    pub post_window: PostWindow,
    /// Path of the persisted publish state.
    pub state_file: PathBuf,
    /// Timeout applied to both the page fetch and the webhook post.
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            league_url: "https://siha-uk.co.uk/snl-league-table-25-26/".to_string(),
            webhook_url: None,
            team_query: String::new(),
            title: "SNL League Table".to_string(),
            timezone: chrono_tz::Europe::London,
            post_window: PostWindow::default(),
            state_file: PathBuf::from("posted.json"),
            http_timeout_secs: 30,
        }
    }
}

impl BotConfig {
    /// Load from an optional TOML file, then fill the webhook URL from the
    /// environment if the file left it unset.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
                toml::from_str(&text).map_err(|e| ConfigError::Invalid {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?
            }
            None => Self::default(),
        };
        if config.webhook_url.is_none() {
            config.webhook_url = std::env::var(WEBHOOK_ENV_VAR).ok().filter(|v| !v.is_empty());
        }
        config
            .post_window
            .validate()
            .map_err(|reason| ConfigError::InvalidWindow { reason })?;
        Ok(config)
    }

    /// The webhook URL, or the startup-fatal configuration error.
    pub fn require_webhook(&self) -> Result<&str, ConfigError> {
        self.webhook_url
            .as_deref()
            .ok_or(ConfigError::MissingWebhook)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
