//! tablewatch core — weekly league-table watcher.
//!
//! Fetches a public standings page, extracts the table into typed rows
//! despite unreliable markup, formats a summary highlighting one team of
//! interest, and posts it to a messaging webhook at most once per ISO week:
//! - Resilient positional table extraction (no header dependence)
//! - Period gate: posting window + persisted ISO-week deduplication
//! - Fetcher/publisher traits with blocking HTTP implementations
//! - Best-effort durable state (lost state duplicates, never misses)

pub mod config;
pub mod domain;
pub mod extract;
pub mod fetch;
pub mod format;
pub mod period;
pub mod publish;
pub mod run;
pub mod state;

pub use config::{BotConfig, ConfigError};
pub use domain::{Extraction, TeamRow};
pub use run::{run_once, RunError, RunOutcome};
