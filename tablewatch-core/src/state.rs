//! Durable publish state — a single JSON record on disk.
//!
//! The state is safety-relevant in only one direction: losing it causes a
//! duplicate post, never a missed one. Read failures of any kind (missing
//! file, unreadable file, corrupt JSON) therefore downgrade to the default
//! "never posted" state instead of failing the run. Writes are a whole-file
//! replace; there is no cross-invocation locking (single-scheduler
//! assumption — overlapping invocations could both pass the duplicate check
//! and double-post, an accepted risk).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The persisted record. One field; an empty string means "never posted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishState {
    #[serde(default)]
    pub last_posted_period: String,
}

/// File-backed store for [`PublishState`].
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state, downgrading every failure to the default.
    pub fn load(&self) -> PublishState {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return PublishState::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state file unreadable, assuming never posted");
                return PublishState::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "state file corrupt, assuming never posted");
                PublishState::default()
            }
        }
    }

    /// Persist the full state, replacing prior content.
    ///
    /// Call only after the publisher confirmed delivery: saving first would
    /// silently skip a real post on the next run if delivery then failed.
    pub fn save(&self, state: &PublishState) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}
