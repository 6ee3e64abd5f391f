//! One scheduled tick of the pipeline.
//!
//! Decision order for a run:
//! 1. Window check — outside the weekly slot, nothing happens.
//! 2. Duplicate check — this ISO week already posted, nothing happens.
//! 3. Fetch → extract → format → publish.
//! 4. State save, only after confirmed delivery.
//!
//! The publish and the save are not atomic: a crash between them re-posts on
//! the next tick in the same week. Duplicates are accepted, missed posts are
//! not.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::config::BotConfig;
use crate::extract::extract_standings;
use crate::fetch::{FetchError, PageFetcher};
use crate::format::format_message;
use crate::period::{already_published, period_key};
use crate::publish::{PublishError, Publisher};
use crate::state::{PublishState, StateStore};

/// What a run decided to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Now is outside the weekly posting window.
    OutsideWindow,
    /// This period was already posted by an earlier tick.
    AlreadyPosted { period: String },
    /// The message was delivered and the state saved.
    Posted { period: String },
}

/// Hard failures that abort a run. State is never mutated on any of these.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("failed to save publish state: {0}")]
    SaveState(#[from] std::io::Error),
}

/// Execute one tick. `force` skips the window check (manual catch-up) but
/// still honors duplicate suppression.
pub fn run_once(
    config: &BotConfig,
    fetcher: &dyn PageFetcher,
    publisher: &dyn Publisher,
    now: DateTime<Utc>,
    force: bool,
) -> Result<RunOutcome, RunError> {
    let now = now.with_timezone(&config.timezone);

    if !force && !config.post_window.should_attempt(now) {
        info!("not in weekly posting window");
        return Ok(RunOutcome::OutsideWindow);
    }

    let store = StateStore::new(&config.state_file);
    let state = store.load();
    let period = period_key(now);

    if already_published(&state, &period) {
        info!(%period, "league table already posted this week");
        return Ok(RunOutcome::AlreadyPosted { period });
    }

    info!(url = %config.league_url, "fetching league table page");
    let html = fetcher.fetch(&config.league_url)?;

    let extraction = extract_standings(&html, &config.team_query);
    info!(
        rows = extraction.standings.len(),
        highlighted = extraction.highlight.is_some(),
        "extracted standings"
    );

    let message = format_message(&extraction, &period, now, &config.team_query, &config.title);

    info!(%period, "posting league table to webhook");
    publisher.publish(&message)?;

    store.save(&PublishState {
        last_posted_period: period.clone(),
    })?;
    info!(%period, "weekly league table posted successfully");

    Ok(RunOutcome::Posted { period })
}
