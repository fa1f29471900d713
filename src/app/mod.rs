//! Application state machine: menu, settings, play, name entry, high scores.
//!
//! Exactly one mode is active. Every input has a defined effect in every
//! mode, even if that effect is nothing. Pause is a flag on the engine while
//! playing, not a mode of its own.

pub mod input;
pub mod runner;
pub mod view;

pub use input::{AppInput, NavAction};
pub use view::{HighScoresView, MenuView, NameInputView, PlayView, Screen, SettingsView};

use crate::constants::{ANONYMOUS_NAME, MAX_NAME_LENGTH, MENU_ITEMS};
use crate::engine::{Direction, EngineRules, SnakeEngine, TickOutcome};
use crate::scores::ScoreLedger;
use crate::settings::{settings_labels, GameSettings, SettingsItem};
use crate::storage::SharedStorage;
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Settings,
    HighScores,
    Playing,
    NameInput,
}

/// Whether the driving loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Main menu rows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Play,
    Settings,
    HighScores,
    Quit,
}

impl MenuItem {
    fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Play,
            1 => Self::Settings,
            2 => Self::HighScores,
            _ => Self::Quit,
        }
    }
}

/// Step `index` one row up or down in a list of `len`, wrapping at both ends.
fn cycle_index(index: usize, len: usize, nav: NavAction) -> usize {
    match nav {
        NavAction::Up => (index + len - 1) % len,
        NavAction::Down => (index + 1) % len,
        NavAction::Select | NavAction::Back => index,
    }
}

pub struct App {
    pub mode: Mode,
    pub settings: GameSettings,
    pub ledger: ScoreLedger,
    pub engine: SnakeEngine,
    pub menu_index: usize,
    pub settings_index: usize,
    /// Name being typed on the game-over screen.
    pub name_buffer: String,
    /// Whether the finished game beat the best score at the time it ended.
    pub new_record: bool,
    store: SharedStorage,
}

impl App {
    /// Load settings and scores from `store` and open the main menu.
    pub fn new(store: SharedStorage, rules: EngineRules, now_ms: u64) -> Self {
        Self::assemble(store, rules, now_ms, None)
    }

    /// Like `new`, with a reproducible food sequence.
    pub fn with_seed(store: SharedStorage, rules: EngineRules, now_ms: u64, seed: u64) -> Self {
        Self::assemble(store, rules, now_ms, Some(seed))
    }

    fn assemble(store: SharedStorage, rules: EngineRules, now_ms: u64, seed: Option<u64>) -> Self {
        let settings = GameSettings::load(store.as_ref());
        // No game runs until Play is chosen.
        let engine = SnakeEngine::standby(rules.clone(), &settings, now_ms, seed);
        let ledger = ScoreLedger::load(store.clone(), rules.ledger_capacity);
        info!(
            "loaded settings ({} / {}) and {} high scores",
            settings.difficulty.name(),
            settings.field_size.name(),
            ledger.len()
        );
        Self {
            mode: Mode::Menu,
            settings,
            ledger,
            engine,
            menu_index: 0,
            settings_index: 0,
            name_buffer: String::new(),
            new_record: false,
            store,
        }
    }

    /// True while the front end should deliver typed characters rather than commands.
    pub fn wants_text(&self) -> bool {
        self.mode == Mode::NameInput
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Route one input event to the active mode.
    pub fn handle_input(&mut self, input: AppInput, now_ms: u64) -> Flow {
        if input == AppInput::Interrupt {
            match self.mode {
                Mode::Settings => self.persist_settings(),
                Mode::NameInput => {
                    let name = std::mem::take(&mut self.name_buffer);
                    self.finish_session(&name);
                }
                _ => {}
            }
            info!("interrupted in {:?}", self.mode);
            return Flow::Exit;
        }

        match self.mode {
            Mode::Menu => return self.handle_menu(input, now_ms),
            Mode::Settings => self.handle_settings(input),
            Mode::HighScores => self.set_mode(Mode::Menu),
            Mode::Playing => self.handle_playing(input, now_ms),
            Mode::NameInput => self.handle_name_input(input),
        }
        Flow::Continue
    }

    fn handle_menu(&mut self, input: AppInput, now_ms: u64) -> Flow {
        if let Some(nav) = input.vertical() {
            self.menu_index = cycle_index(self.menu_index, MENU_ITEMS.len(), nav);
            return Flow::Continue;
        }
        match input {
            AppInput::Nav(NavAction::Select) => match MenuItem::from_index(self.menu_index) {
                MenuItem::Play => self.start_game(now_ms),
                MenuItem::Settings => {
                    self.settings_index = 0;
                    self.set_mode(Mode::Settings);
                }
                MenuItem::HighScores => self.set_mode(Mode::HighScores),
                MenuItem::Quit => return Flow::Exit,
            },
            AppInput::Quit => return Flow::Exit,
            _ => {}
        }
        Flow::Continue
    }

    fn handle_settings(&mut self, input: AppInput) {
        if let Some(nav) = input.vertical() {
            self.settings_index = cycle_index(self.settings_index, SettingsItem::ALL.len(), nav);
            return;
        }
        match input {
            AppInput::Nav(NavAction::Select) => {
                let item = SettingsItem::from_index(self.settings_index);
                if !item.activate(&mut self.settings) {
                    self.leave_settings();
                }
            }
            AppInput::Nav(NavAction::Back) | AppInput::Quit => self.leave_settings(),
            _ => {}
        }
    }

    fn leave_settings(&mut self) {
        self.persist_settings();
        self.set_mode(Mode::Menu);
    }

    fn persist_settings(&mut self) {
        match self.settings.save(self.store.as_ref()) {
            Ok(()) => info!("settings saved"),
            Err(e) => warn!("failed to save settings: {e}"),
        }
    }

    fn handle_playing(&mut self, input: AppInput, now_ms: u64) {
        match input {
            AppInput::Direction(direction) => {
                self.engine.queue_direction(direction);
            }
            AppInput::Nav(NavAction::Up) => {
                self.engine.queue_direction(Direction::Up);
            }
            AppInput::Nav(NavAction::Down) => {
                self.engine.queue_direction(Direction::Down);
            }
            AppInput::Pause => {
                self.engine.toggle_pause();
            }
            AppInput::Restart => self.start_game(now_ms),
            AppInput::Quit | AppInput::Nav(NavAction::Back) => {
                if self.engine.game_over {
                    self.enter_name_input();
                } else {
                    self.engine.abandon(now_ms);
                    info!("session {} abandoned", self.engine.session.id);
                    self.set_mode(Mode::Menu);
                }
            }
            _ => {}
        }
    }

    fn handle_name_input(&mut self, input: AppInput) {
        match input {
            AppInput::Char(c) => {
                if !c.is_control() && self.name_buffer.chars().count() < MAX_NAME_LENGTH {
                    self.name_buffer.push(c);
                }
            }
            AppInput::Backspace => {
                self.name_buffer.pop();
            }
            AppInput::Nav(NavAction::Select) => {
                let name = std::mem::take(&mut self.name_buffer);
                self.finish_session(&name);
            }
            AppInput::Nav(NavAction::Back) | AppInput::Quit => {
                self.name_buffer.clear();
                self.finish_session(ANONYMOUS_NAME);
            }
            _ => {}
        }
    }

    fn start_game(&mut self, now_ms: u64) {
        self.engine.reset(&self.settings, now_ms);
        self.set_mode(Mode::Playing);
    }

    fn enter_name_input(&mut self) {
        self.new_record = self.ledger.is_new_record(self.engine.score);
        self.name_buffer.clear();
        self.set_mode(Mode::NameInput);
    }

    fn finish_session(&mut self, name: &str) {
        let score = self.engine.score;
        self.ledger.add(score, name, &self.engine.session);
        self.set_mode(Mode::Menu);
    }

    /// Advance the simulation. Switches to name entry when the game ends.
    pub fn update(&mut self, now_ms: u64) -> TickOutcome {
        if self.mode != Mode::Playing {
            return TickOutcome::Idle;
        }
        let outcome = self.engine.tick(now_ms);
        if matches!(outcome, TickOutcome::GameOver(_)) {
            self.enter_name_input();
        }
        outcome
    }

    /// Snapshot of the active mode for rendering.
    pub fn view(&self, now_ms: u64) -> Screen {
        match self.mode {
            Mode::Menu => Screen::Menu(MenuView {
                items: MENU_ITEMS.iter().map(|s| s.to_string()).collect(),
                selected: self.menu_index,
                high_score: self.ledger.high_score(),
            }),
            Mode::Settings => {
                let hint = match SettingsItem::from_index(self.settings_index) {
                    SettingsItem::FieldSize => {
                        Some(self.settings.field_size.description().to_string())
                    }
                    _ => None,
                };
                Screen::Settings(SettingsView {
                    items: settings_labels(&self.settings),
                    selected: self.settings_index,
                    hint,
                })
            }
            Mode::HighScores => Screen::HighScores(HighScoresView {
                entries: self.ledger.entries().to_vec(),
                capacity: self.ledger.capacity(),
            }),
            Mode::NameInput => Screen::NameInput(NameInputView {
                name: self.name_buffer.clone(),
                cursor: self.name_buffer.chars().count(),
                is_new_record: self.new_record,
                score: self.engine.score,
                foods_eaten: self.engine.foods_eaten,
                timer: self.engine.session.timer_string(now_ms),
            }),
            Mode::Playing => Screen::Playing(self.play_view(now_ms)),
        }
    }

    pub fn play_view(&self, now_ms: u64) -> PlayView {
        let engine = &self.engine;
        PlayView {
            snake: engine.snake.iter().copied().collect(),
            food: engine.food,
            width: engine.width,
            height: engine.height,
            score: engine.score,
            high_score: self.ledger.high_score().max(engine.score),
            timer: engine.session.timer_string(now_ms),
            speed: engine.display_speed(),
            foods_eaten: engine.foods_eaten,
            paused: engine.paused,
            game_over: engine.game_over,
            show_grid: self.settings.show_grid,
            theme: self.settings.theme,
            field_name: engine.field_size.name(),
            interval_ms: engine.interval_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SCORES_KEY, SETTINGS_KEY};
    use crate::engine::Coordinate;
    use crate::settings::{Difficulty, FieldSize};
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn app() -> (Arc<MemoryStore>, App) {
        let store = MemoryStore::shared();
        let app = App::with_seed(store.clone(), EngineRules::classic(), 0, 11);
        (store, app)
    }

    fn select(app: &mut App, now: u64) -> Flow {
        app.handle_input(AppInput::Nav(NavAction::Select), now)
    }

    #[test]
    fn test_starts_in_menu() {
        let (_, app) = app();
        assert_eq!(app.mode, Mode::Menu);
        assert_eq!(app.menu_index, 0);
        assert!(!app.wants_text());
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let (_, mut app) = app();
        app.handle_input(AppInput::Nav(NavAction::Up), 0);
        assert_eq!(app.menu_index, 3);
        app.handle_input(AppInput::Direction(Direction::Down), 0);
        assert_eq!(app.menu_index, 0);
        for _ in 0..5 {
            app.handle_input(AppInput::Nav(NavAction::Down), 0);
        }
        assert_eq!(app.menu_index, 1);
    }

    #[test]
    fn test_menu_select_targets() {
        let (_, mut app) = app();
        assert_eq!(select(&mut app, 0), Flow::Continue);
        assert_eq!(app.mode, Mode::Playing);

        let (_, mut app) = self::app();
        app.menu_index = 1;
        select(&mut app, 0);
        assert_eq!(app.mode, Mode::Settings);

        let (_, mut app) = self::app();
        app.menu_index = 2;
        select(&mut app, 0);
        assert_eq!(app.mode, Mode::HighScores);

        let (_, mut app) = self::app();
        app.menu_index = 3;
        assert_eq!(select(&mut app, 0), Flow::Exit);
    }

    #[test]
    fn test_high_scores_any_input_returns() {
        let (_, mut app) = app();
        app.menu_index = 2;
        select(&mut app, 0);
        app.handle_input(AppInput::Char('x'), 0);
        assert_eq!(app.mode, Mode::Menu);
    }

    #[test]
    fn test_settings_cycle_and_save() {
        let (store, mut app) = app();
        app.menu_index = 1;
        select(&mut app, 0);

        // Difficulty row
        select(&mut app, 0);
        assert_eq!(app.settings.difficulty, Difficulty::Hard);
        assert_eq!(app.settings.initial_speed, 100);

        // Field size row
        app.handle_input(AppInput::Nav(NavAction::Down), 0);
        select(&mut app, 0);
        assert_eq!(app.settings.field_size, FieldSize::Large);

        // Up from the top wraps to "Save & exit"
        app.settings_index = 0;
        app.handle_input(AppInput::Nav(NavAction::Up), 0);
        assert_eq!(app.settings_index, SettingsItem::ALL.len() - 1);
        assert!(!store.contains(SETTINGS_KEY));
        select(&mut app, 0);

        assert_eq!(app.mode, Mode::Menu);
        assert_eq!(GameSettings::load(store.as_ref()), app.settings);
    }

    #[test]
    fn test_settings_back_persists() {
        let (store, mut app) = app();
        app.menu_index = 1;
        select(&mut app, 0);
        app.settings_index = 2;
        select(&mut app, 0);
        assert!(!app.settings.show_grid);
        app.handle_input(AppInput::Nav(NavAction::Back), 0);
        assert_eq!(app.mode, Mode::Menu);
        assert!(!GameSettings::load(store.as_ref()).show_grid);
    }

    #[test]
    fn test_play_uses_current_settings() {
        let (_, mut app) = app();
        app.settings.field_size = FieldSize::Small;
        select(&mut app, 1_000);
        assert_eq!((app.engine.width, app.engine.height), (15, 10));
        assert_eq!(app.engine.session.start_ms, 1_000);
    }

    #[test]
    fn test_direction_and_pause_while_playing() {
        let (_, mut app) = app();
        select(&mut app, 0);
        app.handle_input(AppInput::Direction(Direction::Up), 0);
        assert_eq!(app.engine.next_direction, Direction::Up);
        app.handle_input(AppInput::Pause, 0);
        assert!(app.engine.paused);
        assert_eq!(app.engine.session.pauses_count, 1);
        assert_eq!(app.update(10_000), TickOutcome::Idle);
        app.handle_input(AppInput::Pause, 0);
        assert!(!app.engine.paused);
    }

    #[test]
    fn test_quit_mid_game_returns_to_menu_without_score() {
        let (_, mut app) = app();
        select(&mut app, 0);
        app.handle_input(AppInput::Quit, 500);
        assert_eq!(app.mode, Mode::Menu);
        assert!(app.ledger.is_empty());
    }

    #[test]
    fn test_restart_starts_new_session() {
        let (_, mut app) = app();
        select(&mut app, 0);
        let first = app.engine.session.id.clone();
        app.handle_input(AppInput::Restart, 700);
        assert_eq!(app.mode, Mode::Playing);
        assert_ne!(app.engine.session.id, first);
        assert_eq!(app.engine.session.start_ms, 700);
    }

    fn crash(app: &mut App) {
        let head = app.engine.head();
        app.engine.snake[0] = Coordinate::new(head.row, app.engine.width - 1);
        app.engine.food = Coordinate::new(0, 0);
        let now = app.engine.last_tick_ms + app.engine.interval_ms;
        assert!(matches!(app.update(now), TickOutcome::GameOver(_)));
    }

    #[test]
    fn test_game_over_enters_name_input() {
        let (_, mut app) = app();
        select(&mut app, 0);
        crash(&mut app);
        assert_eq!(app.mode, Mode::NameInput);
        assert!(app.wants_text());
        assert!(!app.new_record);
    }

    #[test]
    fn test_name_entry_and_confirm() {
        let (store, mut app) = app();
        select(&mut app, 0);
        app.engine.score = 40;
        crash(&mut app);
        assert!(app.new_record);

        for c in "Ada!x".chars() {
            app.handle_input(AppInput::Char(c), 0);
        }
        app.handle_input(AppInput::Backspace, 0);
        app.handle_input(AppInput::Char('\u{7}'), 0);
        assert_eq!(app.name_buffer, "Ada!");
        select(&mut app, 0);

        assert_eq!(app.mode, Mode::Menu);
        assert_eq!(app.ledger.entries()[0].name, "Ada!");
        assert_eq!(app.ledger.high_score(), 40);
        assert!(store.contains(SCORES_KEY));
    }

    #[test]
    fn test_name_length_is_bounded() {
        let (_, mut app) = app();
        select(&mut app, 0);
        crash(&mut app);
        for _ in 0..(MAX_NAME_LENGTH + 5) {
            app.handle_input(AppInput::Char('z'), 0);
        }
        assert_eq!(app.name_buffer.chars().count(), MAX_NAME_LENGTH);
    }

    #[test]
    fn test_skip_uses_placeholder() {
        let (_, mut app) = app();
        select(&mut app, 0);
        crash(&mut app);
        app.handle_input(AppInput::Char('Q'), 0);
        app.handle_input(AppInput::Nav(NavAction::Back), 0);
        assert_eq!(app.ledger.entries()[0].name, ANONYMOUS_NAME);
        assert_eq!(app.mode, Mode::Menu);
    }

    #[test]
    fn test_confirm_blank_name_uses_placeholder() {
        let (_, mut app) = app();
        select(&mut app, 0);
        crash(&mut app);
        app.handle_input(AppInput::Char(' '), 0);
        select(&mut app, 0);
        assert_eq!(app.ledger.entries()[0].name, ANONYMOUS_NAME);
    }

    #[test]
    fn test_interrupt_exits_from_any_mode() {
        let (_, mut app) = app();
        assert_eq!(app.handle_input(AppInput::Interrupt, 0), Flow::Exit);
        select(&mut app, 0);
        assert_eq!(app.handle_input(AppInput::Interrupt, 0), Flow::Exit);
    }

    #[test]
    fn test_interrupt_at_name_prompt_records_score() {
        let (store, mut app) = app();
        select(&mut app, 0);
        app.engine.score = 30;
        crash(&mut app);
        for c in "Lin".chars() {
            app.handle_input(AppInput::Char(c), 0);
        }
        assert_eq!(app.handle_input(AppInput::Interrupt, 0), Flow::Exit);

        let reloaded = ScoreLedger::load(store, 50);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].name, "Lin");
        assert_eq!(reloaded.entries()[0].score, 30);
    }

    #[test]
    fn test_interrupt_at_blank_name_prompt_uses_placeholder() {
        let (_, mut app) = app();
        select(&mut app, 0);
        crash(&mut app);
        app.handle_input(AppInput::Interrupt, 0);
        assert_eq!(app.ledger.entries()[0].name, ANONYMOUS_NAME);
    }

    #[test]
    fn test_first_play_starts_the_session() {
        let (_, mut app) = app();
        let standby_id = app.engine.session.id.clone();
        assert_eq!(app.engine.session.moves_made, 0);

        select(&mut app, 900);
        assert_ne!(app.engine.session.id, standby_id);
        assert_eq!(app.engine.session.start_ms, 900);
        assert_eq!(app.engine.last_tick_ms, 900);
    }

    #[test]
    fn test_update_idle_outside_play() {
        let (_, mut app) = app();
        assert_eq!(app.update(1_000_000), TickOutcome::Idle);
    }

    #[test]
    fn test_views_per_mode() {
        let (_, mut app) = app();
        match app.view(0) {
            Screen::Menu(v) => {
                assert_eq!(v.items.len(), 4);
                assert_eq!(v.selected, 0);
            }
            other => panic!("unexpected {other:?}"),
        }

        app.menu_index = 1;
        select(&mut app, 0);
        app.settings_index = 1;
        match app.view(0) {
            Screen::Settings(v) => {
                assert_eq!(v.items.len(), SettingsItem::ALL.len());
                assert!(v.hint.is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
        app.handle_input(AppInput::Nav(NavAction::Back), 0);

        app.menu_index = 0;
        select(&mut app, 0);
        match app.view(61_000) {
            Screen::Playing(v) => {
                assert_eq!(v.snake.len(), 3);
                assert_eq!(v.timer, "01:01");
                assert_eq!(v.speed, 50);
                assert!(!v.paused);
                assert!(!v.game_over);
            }
            other => panic!("unexpected {other:?}"),
        }

        crash(&mut app);
        match app.view(0) {
            Screen::NameInput(v) => {
                assert_eq!(v.name, "");
                assert_eq!(v.cursor, 0);
                assert_eq!(v.score, 0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
