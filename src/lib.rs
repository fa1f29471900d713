//! Snake - terminal Snake game library.
//!
//! The engine, settings, score ledger and application state machine are
//! platform-agnostic; `ui` and `input` are the ratatui/crossterm front end.

pub mod app;
pub mod constants;
pub mod engine;
pub mod input;
pub mod logger;
pub mod scores;
pub mod session;
pub mod settings;
pub mod storage;
pub mod ui;

pub use app::{App, AppInput, Flow, Mode, NavAction, Screen};
pub use engine::{
    BoundaryPolicy, Collision, Coordinate, Direction, EngineRules, SnakeEngine, TickOutcome,
};
pub use scores::{ScoreEntry, ScoreLedger};
pub use session::GameSession;
pub use settings::{Difficulty, FieldSize, GameSettings, Theme};
pub use storage::{FileStore, MemoryStore, SharedStorage, Storage, StorageError};
