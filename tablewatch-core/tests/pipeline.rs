//! End-to-end pipeline scenarios with mock collaborators.
//!
//! Covers the four canonical runs: a populated table with the team of
//! interest, a page with no table at all, a week that was already posted,
//! and a webhook delivery failure that must leave state untouched.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use tablewatch_core::config::BotConfig;
use tablewatch_core::fetch::{FetchError, PageFetcher};
use tablewatch_core::publish::{PublishError, Publisher};
use tablewatch_core::run::{run_once, RunError, RunOutcome};
use tablewatch_core::state::{PublishState, StateStore};
use tempfile::TempDir;

struct StaticFetcher {
    html: &'static str,
}

impl PageFetcher for StaticFetcher {
    fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Ok(self.html.to_string())
    }
}

struct TimeoutFetcher;

impl PageFetcher for TimeoutFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        Err(FetchError::Transport {
            url: url.to_string(),
            reason: "operation timed out".to_string(),
        })
    }
}

/// Records every delivered message; optionally rejects with a given status.
#[derive(Default)]
struct RecordingPublisher {
    sent: RefCell<Vec<String>>,
    reject_with: Option<u16>,
}

impl Publisher for RecordingPublisher {
    fn publish(&self, content: &str) -> Result<(), PublishError> {
        if let Some(status) = self.reject_with {
            return Err(PublishError::BadStatus { status });
        }
        self.sent.borrow_mut().push(content.to_string());
        Ok(())
    }
}

const TABLE_HTML: &str = r#"
    <html><body>
    <table>
      <thead><tr><th>Pos</th><th>Team</th><th>P</th><th>Pts</th><th>GD</th></tr></thead>
      <tbody>
        <tr><td>1</td><td>Capitals</td><td>10</td><td>15</td><td>+8</td></tr>
        <tr><td>2</td><td>Warriors</td><td>10</td><td>14</td><td>+3</td></tr>
        <tr><td>3</td><td>Eagles</td><td>10</td><td>9</td><td>-11</td></tr>
      </tbody>
    </table>
    </body></html>"#;

const NO_TABLE_HTML: &str = "<html><body><p>Site maintenance in progress</p></body></html>";

/// Monday 2025-12-15 18:05 UTC — inside the default window (London is on
/// GMT in December), ISO week 2025-W51.
fn in_window_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 15, 18, 5, 0).unwrap()
}

fn test_config(dir: &TempDir) -> BotConfig {
    BotConfig {
        team_query: "capitals".to_string(),
        state_file: dir.path().join("posted.json"),
        ..BotConfig::default()
    }
}

fn read_state(path: &Path) -> PublishState {
    StateStore::new(path).load()
}

#[test]
fn populated_table_posts_and_saves_state() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StaticFetcher { html: TABLE_HTML };
    let publisher = RecordingPublisher::default();

    let outcome = run_once(&config, &fetcher, &publisher, in_window_now(), false).unwrap();
    assert_eq!(
        outcome,
        RunOutcome::Posted {
            period: "2025-W51".to_string()
        }
    );

    let sent = publisher.sent.borrow();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert!(message.contains("2025-W51"));
    assert!(message.contains("✅ Capitals: position 1 — 15 pts from 10 games"));
    assert!(message.contains("➡️ 1. Capitals"));
    assert!(message.contains("2. Warriors — 14 pts (10 GP)"));
    assert!(message.contains("3. Eagles — 9 pts (10 GP)"));

    assert_eq!(read_state(&config.state_file).last_posted_period, "2025-W51");
}

#[test]
fn no_table_still_posts_the_no_data_message() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StaticFetcher {
        html: NO_TABLE_HTML,
    };
    let publisher = RecordingPublisher::default();

    let outcome = run_once(&config, &fetcher, &publisher, in_window_now(), false).unwrap();
    assert!(matches!(outcome, RunOutcome::Posted { .. }));

    let sent = publisher.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("No standings data detected"));
    // Nothing after the no-data line.
    assert_eq!(sent[0].lines().count(), 2);
}

#[test]
fn already_posted_week_skips_the_publish() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    StateStore::new(&config.state_file)
        .save(&PublishState {
            last_posted_period: "2025-W51".to_string(),
        })
        .unwrap();

    let fetcher = StaticFetcher { html: TABLE_HTML };
    let publisher = RecordingPublisher::default();

    let outcome = run_once(&config, &fetcher, &publisher, in_window_now(), false).unwrap();
    assert_eq!(
        outcome,
        RunOutcome::AlreadyPosted {
            period: "2025-W51".to_string()
        }
    );
    assert!(publisher.sent.borrow().is_empty());
}

#[test]
fn failed_publish_aborts_without_touching_state() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    StateStore::new(&config.state_file)
        .save(&PublishState {
            last_posted_period: "2025-W50".to_string(),
        })
        .unwrap();

    let fetcher = StaticFetcher { html: TABLE_HTML };
    let publisher = RecordingPublisher {
        sent: RefCell::new(Vec::new()),
        reject_with: Some(500),
    };

    let result = run_once(&config, &fetcher, &publisher, in_window_now(), false);
    assert!(matches!(result, Err(RunError::Publish(_))));
    // Pre-run state survives unchanged.
    assert_eq!(read_state(&config.state_file).last_posted_period, "2025-W50");
}

#[test]
fn fetch_failure_aborts_before_any_state_mutation() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let publisher = RecordingPublisher::default();

    let result = run_once(&config, &TimeoutFetcher, &publisher, in_window_now(), false);
    assert!(matches!(result, Err(RunError::Fetch(_))));
    assert!(publisher.sent.borrow().is_empty());
    assert!(!config.state_file.exists());
}

#[test]
fn outside_window_does_nothing() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StaticFetcher { html: TABLE_HTML };
    let publisher = RecordingPublisher::default();

    // Tuesday 18:05.
    let now = Utc.with_ymd_and_hms(2025, 12, 16, 18, 5, 0).unwrap();
    let outcome = run_once(&config, &fetcher, &publisher, now, false).unwrap();
    assert_eq!(outcome, RunOutcome::OutsideWindow);
    assert!(publisher.sent.borrow().is_empty());
    assert!(!config.state_file.exists());
}

#[test]
fn force_bypasses_window_but_not_duplicate_suppression() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StaticFetcher { html: TABLE_HTML };
    let publisher = RecordingPublisher::default();

    // Saturday 2025-12-20 09:00, outside the window; week is still W51.
    let now = Utc.with_ymd_and_hms(2025, 12, 20, 9, 0, 0).unwrap();
    let outcome = run_once(&config, &fetcher, &publisher, now, true).unwrap();
    assert!(matches!(outcome, RunOutcome::Posted { .. }));

    let outcome = run_once(&config, &fetcher, &publisher, now, true).unwrap();
    assert_eq!(
        outcome,
        RunOutcome::AlreadyPosted {
            period: "2025-W51".to_string()
        }
    );
    assert_eq!(publisher.sent.borrow().len(), 1);
}

#[test]
fn window_check_uses_the_target_zone_not_utc() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StaticFetcher { html: TABLE_HTML };
    let publisher = RecordingPublisher::default();

    // Monday 2026-06-22 17:05 UTC is 18:05 in London (BST): inside the
    // window even though the UTC hour is wrong.
    let now = Utc.with_ymd_and_hms(2026, 6, 22, 17, 5, 0).unwrap();
    let outcome = run_once(&config, &fetcher, &publisher, now, false).unwrap();
    assert!(matches!(outcome, RunOutcome::Posted { .. }));

    // And Monday 18:05 UTC is 19:05 London: outside.
    let dir2 = TempDir::new().unwrap();
    let config2 = test_config(&dir2);
    let now = Utc.with_ymd_and_hms(2026, 6, 22, 18, 5, 0).unwrap();
    let outcome = run_once(&config2, &fetcher, &publisher, now, false).unwrap();
    assert_eq!(outcome, RunOutcome::OutsideWindow);
}
