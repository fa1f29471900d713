//! Integration test: application flow
//!
//! Walks the state machine from the main menu through a game, the name
//! prompt and back, against an in-memory store. Also drives the frame loop
//! with a scripted input source, a recording sink and a manual clock.

use snake::app::runner::{run, Clock, InputSource, RenderSink};
use snake::constants::{ANONYMOUS_NAME, SCORES_KEY, SETTINGS_KEY};
use snake::{
    App, AppInput, Coordinate, Direction, EngineRules, FieldSize, Flow, GameSettings,
    MemoryStore, Mode, NavAction, ScoreLedger, Screen, TickOutcome,
};
use std::cell::Cell;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::Duration;

const SELECT: AppInput = AppInput::Nav(NavAction::Select);
const DOWN: AppInput = AppInput::Nav(NavAction::Down);

fn new_app(store: &Arc<MemoryStore>) -> App {
    App::with_seed(store.clone(), EngineRules::classic(), 0, 42)
}

/// Tick the engine until the game ends, returning the time it ended at.
fn play_until_crash(app: &mut App, mut now: u64) -> u64 {
    for _ in 0..1_000 {
        now += app.engine.interval_ms;
        if let TickOutcome::GameOver(_) = app.update(now) {
            return now;
        }
    }
    panic!("game never ended");
}

// =============================================================================
// Full flow
// =============================================================================

#[test]
fn test_menu_play_crash_name_ledger() {
    let store = MemoryStore::shared();
    let mut app = new_app(&store);

    assert_eq!(app.handle_input(SELECT, 0), Flow::Continue);
    assert_eq!(app.mode, Mode::Playing);

    // Feed the snake once, then run it into the right wall.
    app.engine.food = app.engine.head() + Direction::Right;
    let t = app.engine.interval_ms;
    assert_eq!(app.update(t), TickOutcome::Ate);
    app.engine.food = Coordinate::new(0, 0);
    let ended = play_until_crash(&mut app, t);

    assert_eq!(app.mode, Mode::NameInput);
    assert!(app.new_record);
    assert_eq!(app.engine.session.end_ms, Some(ended));

    for c in "Grace".chars() {
        app.handle_input(AppInput::Char(c), ended);
    }
    app.handle_input(SELECT, ended);

    assert_eq!(app.mode, Mode::Menu);
    let entry = &app.ledger.entries()[0];
    assert_eq!(entry.name, "Grace");
    assert_eq!(entry.score, 10);
    assert_eq!(entry.foods_eaten, 1);
    assert_eq!(entry.field_size, "Medium");
    assert!(store.contains(SCORES_KEY));

    // A fresh app over the same store sees the saved score.
    let reloaded = new_app(&store);
    assert_eq!(reloaded.ledger.high_score(), 10);
}

#[test]
fn test_second_game_not_a_record() {
    let store = MemoryStore::shared();
    let mut app = new_app(&store);

    app.handle_input(SELECT, 0);
    app.engine.score = 50;
    app.engine.food = Coordinate::new(0, 0);
    let ended = play_until_crash(&mut app, 0);
    app.handle_input(AppInput::Nav(NavAction::Back), ended);
    assert_eq!(app.ledger.entries()[0].name, ANONYMOUS_NAME);

    app.handle_input(SELECT, ended);
    app.engine.food = Coordinate::new(0, 0);
    let ended = play_until_crash(&mut app, ended);
    assert!(!app.new_record);
    app.handle_input(SELECT, ended);

    let scores: Vec<u32> = app.ledger.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![50, 0]);
}

#[test]
fn test_settings_change_applies_to_next_game() {
    let store = MemoryStore::shared();
    let mut app = new_app(&store);

    app.handle_input(DOWN, 0);
    app.handle_input(SELECT, 0);
    assert_eq!(app.mode, Mode::Settings);

    // Field size: Medium -> Large -> Classic -> Small
    app.handle_input(DOWN, 0);
    for _ in 0..3 {
        app.handle_input(SELECT, 0);
    }
    app.handle_input(AppInput::Quit, 0);
    assert_eq!(app.mode, Mode::Menu);
    assert!(store.contains(SETTINGS_KEY));

    assert_eq!(app.menu_index, 1);
    app.handle_input(AppInput::Nav(NavAction::Up), 0);
    app.handle_input(SELECT, 100);

    assert_eq!(app.mode, Mode::Playing);
    assert_eq!((app.engine.width, app.engine.height), (15, 10));

    let saved = GameSettings::load(store.as_ref());
    assert_eq!(saved.field_size, FieldSize::Small);
}

#[test]
fn test_high_scores_screen_and_exit() {
    let store = MemoryStore::shared();
    let mut app = new_app(&store);

    app.handle_input(DOWN, 0);
    app.handle_input(DOWN, 0);
    app.handle_input(SELECT, 0);
    assert!(matches!(app.view(0), Screen::HighScores(_)));
    app.handle_input(AppInput::Pause, 0);
    assert_eq!(app.mode, Mode::Menu);

    assert_eq!(app.menu_index, 2);
    app.handle_input(DOWN, 0);
    assert_eq!(app.handle_input(SELECT, 0), Flow::Exit);
}

#[test]
fn test_ledger_capacity_follows_rules() {
    let store = MemoryStore::shared();
    let mut app = App::with_seed(store.clone(), EngineRules::mobile(), 0, 1);
    for i in 0..15u32 {
        app.handle_input(SELECT, 0);
        app.engine.score = i;
        app.engine.abandon(0);
        app.ledger.add(i, "p", &app.engine.session);
        app.handle_input(AppInput::Quit, 0);
    }
    assert_eq!(app.ledger.len(), 10);
    assert_eq!(app.ledger.high_score(), 14);

    let reloaded = ScoreLedger::load(store.clone(), 10);
    let scores: Vec<u32> = reloaded.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, (5..15).rev().collect::<Vec<u32>>());
}

// =============================================================================
// Frame loop
// =============================================================================

struct Script(VecDeque<Vec<AppInput>>);

impl InputSource for Script {
    fn poll_input(&mut self, _text_entry: bool) -> io::Result<Option<AppInput>> {
        // Each frame's batch is drained in order; an empty batch ends the frame.
        let Some(batch) = self.0.front_mut() else {
            return Ok(Some(AppInput::Interrupt));
        };
        if batch.is_empty() {
            self.0.pop_front();
            Ok(None)
        } else {
            Ok(Some(batch.remove(0)))
        }
    }
}

#[derive(Default)]
struct Recorder(Vec<Screen>);

impl RenderSink for Recorder {
    fn draw(&mut self, screen: &Screen) -> io::Result<()> {
        self.0.push(screen.clone());
        Ok(())
    }
}

/// Advances a fixed step every time it is read.
struct ManualClock {
    now: Cell<u64>,
    step: u64,
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

#[test]
fn test_runner_plays_until_quit() {
    let store = MemoryStore::shared();
    let mut app = new_app(&store);
    let mut frames: VecDeque<Vec<AppInput>> = VecDeque::new();
    frames.push_back(vec![SELECT]);
    frames.push_back(vec![AppInput::Direction(Direction::Up)]);
    for _ in 0..4 {
        frames.push_back(vec![]);
    }
    frames.push_back(vec![AppInput::Quit]);
    frames.push_back(vec![AppInput::Quit]);
    let mut input = Script(frames);
    let mut recorder = Recorder::default();
    let clock = ManualClock {
        now: Cell::new(0),
        step: 100,
    };

    run(&mut app, &mut recorder, &mut input, &clock, Duration::ZERO).unwrap();

    // Select, direction, 4 idle frames, quit-to-menu; the final quit exits.
    assert_eq!(recorder.0.len(), 7);
    assert!(matches!(recorder.0[0], Screen::Playing(_)));
    assert!(matches!(recorder.0.last(), Some(Screen::Menu(_))));

    let moved_up = recorder.0.iter().any(|screen| match screen {
        Screen::Playing(view) => view.snake[0].row < 7,
        _ => false,
    });
    assert!(moved_up);
    assert!(app.ledger.is_empty());
}
