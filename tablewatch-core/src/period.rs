//! ISO-week period keys and the weekly posting window.
//!
//! The tool is fired every few minutes by an external scheduler with no
//! timing guarantees, so safety comes from a double gate: the window check
//! says whether "now" is inside the configured weekly slot at all, and the
//! period key comparison against persisted state says whether this ISO week
//! was already posted. Only the first successful run inside the window for a
//! given week publishes.

use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::state::PublishState;

/// Deduplication key for one ISO week, e.g. `"2025-W51"`.
///
/// Uses the ISO week-numbering year, not the calendar year, so timestamps in
/// ISO week 1 that fall in late December of the prior calendar year still
/// key to the new week-year.
pub fn period_key(now: DateTime<Tz>) -> String {
    let iso = now.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Weekly posting window in the target time zone.
///
/// The window is a single hour-slice of one weekday with an inclusive minute
/// tolerance, wide enough to absorb scheduler jitter. Default: Monday
/// 18:00–18:10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostWindow {
    /// Day of week, 0 = Monday … 6 = Sunday.
    pub day: u8,
    /// Hour of day, 0–23.
    pub hour: u32,
    /// Last minute of the window, inclusive (minutes 0..=minute_max).
    pub minute_max: u32,
}

impl Default for PostWindow {
    fn default() -> Self {
        Self {
            day: 0,
            hour: 18,
            minute_max: 10,
        }
    }
}

impl PostWindow {
    /// True iff `now` falls inside the window. `now` must already be in the
    /// target zone; the caller converts once at the top of the run.
    pub fn should_attempt(&self, now: DateTime<Tz>) -> bool {
        now.weekday().num_days_from_monday() == u32::from(self.day)
            && now.hour() == self.hour
            && now.minute() <= self.minute_max
    }

    /// Check field ranges. An out-of-range weekday or hour would otherwise
    /// build a window that never fires, silently skipping every post.
    pub fn validate(&self) -> Result<(), String> {
        if self.day > 6 {
            return Err(format!("day {} out of range 0..=6 (0 = Monday)", self.day));
        }
        if self.hour > 23 {
            return Err(format!("hour {} out of range 0..=23", self.hour));
        }
        if self.minute_max > 59 {
            return Err(format!("minute_max {} out of range 0..=59", self.minute_max));
        }
        Ok(())
    }
}

/// True iff the persisted state records a successful post for `key`.
pub fn already_published(state: &PublishState, key: &str) -> bool {
    state.last_posted_period == key
}
