//! Persisted top-N leaderboard.
//!
//! Stored as a JSON array of `{name, score, date}` under a fixed key. The
//! leaderboard never fails outward: unreadable data loads as an empty list and
//! a failed write still returns the list the caller would have seen.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::store::KeyValueStore;

/// Key the leaderboard is stored under
pub const LEADERBOARD_KEY: &str = "snake-leaderboard";

/// Maximum number of kept entries
pub const LEADERBOARD_SIZE: usize = 10;

/// Name recorded when the player left it blank
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub date: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: u32, date: DateTime<Utc>) -> Self {
        let name = name.trim();
        let name = if name.is_empty() { ANONYMOUS } else { name };

        Self {
            name: name.to_string(),
            score,
            date,
        }
    }
}

pub struct Leaderboard {
    store: Arc<dyn KeyValueStore>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current entries, best first. Empty on any read or parse failure.
    pub fn load(&self) -> Vec<LeaderboardEntry> {
        let raw = match self.store.get(LEADERBOARD_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "could not read leaderboard");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "leaderboard data is corrupt, starting fresh");
                Vec::new()
            }
        }
    }

    /// Record a score now and return the updated list
    pub fn save(&self, name: &str, score: u32) -> Vec<LeaderboardEntry> {
        self.save_entry(LeaderboardEntry::new(name, score, Utc::now()))
    }

    /// Insert an entry, keep the best `LEADERBOARD_SIZE`, persist, and return them
    pub fn save_entry(&self, entry: LeaderboardEntry) -> Vec<LeaderboardEntry> {
        let mut entries = self.load();
        entries.push(entry);
        // Stable: equal scores keep their earlier entries first
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(LEADERBOARD_SIZE);

        match serde_json::to_string(&entries) {
            Ok(json) => {
                if let Err(err) = self.store.set(LEADERBOARD_KEY, &json) {
                    warn!(error = %err, "could not persist leaderboard");
                }
            }
            Err(err) => warn!(error = %err, "could not serialize leaderboard"),
        }

        entries
    }
}
