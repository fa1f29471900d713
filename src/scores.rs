//! High-score ledger: a capped, descending leaderboard persisted as JSON.

use crate::constants::{ANONYMOUS_NAME, MAX_NAME_LENGTH, SCORES_KEY};
use crate::session::GameSession;
use crate::settings::{Difficulty, FieldSize};
use crate::storage::{load_json_or_default, save_json, SharedStorage};
use chrono::{DateTime, Local};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// One leaderboard row. Rows from older score files may carry only
/// `score`, `name` and `timestamp`; the rest take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreEntry {
    pub score: u32,
    pub name: String,
    /// Local time, `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    pub field_size: String,
    pub difficulty: String,
    /// Seconds played.
    pub duration: f64,
    pub foods_eaten: u32,
    pub moves_made: u32,
    /// Points per move.
    pub efficiency: f64,
}

impl Default for ScoreEntry {
    fn default() -> Self {
        Self {
            score: 0,
            name: ANONYMOUS_NAME.to_string(),
            timestamp: String::new(),
            field_size: FieldSize::Medium.name().to_string(),
            difficulty: Difficulty::Medium.name().to_string(),
            duration: 0.0,
            foods_eaten: 0,
            moves_made: 0,
            efficiency: 0.0,
        }
    }
}

impl ScoreEntry {
    pub fn from_session(score: u32, name: &str, session: &GameSession, at: DateTime<Local>) -> Self {
        Self {
            score,
            name: normalize_name(name),
            timestamp: at.format("%Y-%m-%d %H:%M:%S").to_string(),
            field_size: session.field_size.name().to_string(),
            difficulty: session.difficulty.name().to_string(),
            duration: session.final_duration_secs(),
            foods_eaten: session.foods_eaten,
            moves_made: session.moves_made,
            efficiency: score as f64 / session.moves_made.max(1) as f64,
        }
    }
}

/// Trim and cap a player name; blank names become the placeholder.
pub fn normalize_name(name: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_NAME_LENGTH).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        ANONYMOUS_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sorted, size-capped list of scores backed by a store.
pub struct ScoreLedger {
    entries: Vec<ScoreEntry>,
    capacity: usize,
    store: SharedStorage,
}

impl ScoreLedger {
    /// Load from the store. Missing or corrupt data yields an empty ledger;
    /// a single unreadable row is dropped and the rest are kept.
    pub fn load(store: SharedStorage, capacity: usize) -> Self {
        let rows: Vec<serde_json::Value> = load_json_or_default(store.as_ref(), SCORES_KEY);
        let mut entries: Vec<ScoreEntry> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(i, row)| match serde_json::from_value(row) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("dropping unreadable high score row {i}: {e}");
                    None
                }
            })
            .collect();
        sort_and_truncate(&mut entries, capacity);
        Self {
            entries,
            capacity,
            store,
        }
    }

    /// Record a finished game. Persists immediately; a failed write is logged
    /// and the in-memory ledger is kept.
    pub fn add(&mut self, score: u32, name: &str, session: &GameSession) -> &[ScoreEntry] {
        self.add_at(score, name, session, Local::now())
    }

    pub fn add_at(
        &mut self,
        score: u32,
        name: &str,
        session: &GameSession,
        at: DateTime<Local>,
    ) -> &[ScoreEntry] {
        let entry = ScoreEntry::from_session(score, name, session, at);
        info!(
            "session {} recorded: {} scored {} in {:.1}s",
            session.id, entry.name, entry.score, entry.duration
        );
        self.entries.push(entry);
        sort_and_truncate(&mut self.entries, self.capacity);
        self.save();
        &self.entries
    }

    fn save(&self) {
        if let Err(e) = save_json(self.store.as_ref(), SCORES_KEY, &self.entries) {
            warn!("failed to save high scores: {e}");
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// The best `n` entries.
    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn high_score(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// True when `score` would beat the current best.
    pub fn is_new_record(&self, score: u32) -> bool {
        score > self.high_score()
    }

    /// Entries played on one field preset, best first.
    pub fn by_field_size(&self, field_size: &str) -> Vec<&ScoreEntry> {
        self.entries
            .iter()
            .filter(|e| e.field_size == field_size)
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stable sort, so equal scores keep insertion order.
fn sort_and_truncate(entries: &mut Vec<ScoreEntry>, capacity: usize) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(capacity);
}
