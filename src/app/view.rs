//! Read-only view models handed to render back ends.

use crate::engine::Coordinate;
use crate::scores::ScoreEntry;
use crate::settings::Theme;

#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub items: Vec<String>,
    pub selected: usize,
    pub high_score: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub items: Vec<String>,
    pub selected: usize,
    /// Extra line describing the selected field-size preset.
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighScoresView {
    pub entries: Vec<ScoreEntry>,
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NameInputView {
    pub name: String,
    pub cursor: usize,
    pub is_new_record: bool,
    pub score: u32,
    pub foods_eaten: u32,
    pub timer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayView {
    pub snake: Vec<Coordinate>,
    pub food: Coordinate,
    pub width: i32,
    pub height: i32,
    pub score: u32,
    pub high_score: u32,
    /// Elapsed session time, `MM:SS`.
    pub timer: String,
    pub speed: i64,
    pub foods_eaten: u32,
    pub paused: bool,
    pub game_over: bool,
    pub show_grid: bool,
    pub theme: Theme,
    pub field_name: &'static str,
    pub interval_ms: u64,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu(MenuView),
    Settings(SettingsView),
    HighScores(HighScoresView),
    NameInput(NameInputView),
    Playing(PlayView),
}
