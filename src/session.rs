//! Per-playthrough statistics, folded into a score entry at game over.

use crate::settings::{Difficulty, FieldSize};

/// Statistics for one game, from reset to game over.
///
/// Times are in the engine's millisecond clock (the `now` passed to `tick`),
/// not wall-clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    /// Random identifier used to correlate log lines.
    pub id: String,
    pub start_ms: u64,
    /// Unset until the game ends.
    pub end_ms: Option<u64>,
    pub score: u32,
    pub foods_eaten: u32,
    pub max_length: usize,
    pub moves_made: u32,
    pub pauses_count: u32,
    pub field_size: FieldSize,
    pub difficulty: Difficulty,
}

impl GameSession {
    pub fn new(start_ms: u64, field_size: FieldSize, difficulty: Difficulty, length: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start_ms,
            end_ms: None,
            score: 0,
            foods_eaten: 0,
            max_length: length,
            moves_made: 0,
            pauses_count: 0,
            field_size,
            difficulty,
        }
    }

    /// Milliseconds played, up to `now_ms` or the recorded end.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.end_ms.unwrap_or(now_ms).saturating_sub(self.start_ms)
    }

    pub fn duration_secs(&self, now_ms: u64) -> f64 {
        self.elapsed_ms(now_ms) as f64 / 1000.0
    }

    /// Duration of a finished session; zero while it is still running.
    pub fn final_duration_secs(&self) -> f64 {
        match self.end_ms {
            Some(end) => end.saturating_sub(self.start_ms) as f64 / 1000.0,
            None => 0.0,
        }
    }

    /// Elapsed time as `MM:SS`.
    pub fn timer_string(&self, now_ms: u64) -> String {
        let secs = self.elapsed_ms(now_ms) / 1000;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn finish(&mut self, end_ms: u64) {
        if self.end_ms.is_none() {
            self.end_ms = Some(end_ms);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.end_ms.is_some()
    }

    pub fn record_length(&mut self, length: usize) {
        self.max_length = self.max_length.max(length);
    }
}
