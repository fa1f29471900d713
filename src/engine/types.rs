//! Snake engine data structures.
//!
//! The engine owns the snake, the food, the direction buffer, the score and the
//! speed ramp. It never reads a clock: simulation time is whatever the driver
//! passes to `tick`.

use super::grid::{Coordinate, Direction};
use crate::constants::{FOOD_PLACEMENT_ATTEMPTS, FOOD_REWARD, TIME_RAMP_EVERY_MS};
use crate::session::GameSession;
use crate::settings::{FieldSize, GameSettings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// What happens when the head leaves the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Hitting a wall ends the game.
    #[default]
    Terminate,
    /// The head re-enters from the opposite edge.
    Wrap,
}

/// Constants that differ between the game's variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRules {
    pub boundary: BoundaryPolicy,
    pub food_reward: u32,
    /// Interval decrease per food eaten (only with auto speed-up enabled).
    pub food_speed_step_ms: u64,
    pub food_speed_floor_ms: u64,
    /// Interval decrease per timer period (timer mode plus auto speed-up).
    pub time_speed_step_ms: u64,
    pub time_speed_floor_ms: u64,
    pub time_ramp_every_ms: u64,
    pub food_placement_attempts: u32,
    pub ledger_capacity: usize,
}

impl EngineRules {
    /// The shared engine's constants.
    pub fn classic() -> Self {
        Self {
            boundary: BoundaryPolicy::Terminate,
            food_reward: FOOD_REWARD,
            food_speed_step_ms: 3,
            food_speed_floor_ms: 40,
            time_speed_step_ms: 10,
            time_speed_floor_ms: 50,
            time_ramp_every_ms: TIME_RAMP_EVERY_MS,
            food_placement_attempts: FOOD_PLACEMENT_ATTEMPTS,
            ledger_capacity: 50,
        }
    }

    /// Faster ramp with lower floors and a top-20 table.
    pub fn premium() -> Self {
        Self {
            food_speed_step_ms: 2,
            food_speed_floor_ms: 30,
            time_speed_step_ms: 5,
            time_speed_floor_ms: 40,
            ledger_capacity: 20,
            ..Self::classic()
        }
    }

    /// Touch-demo rules: the field wraps around.
    pub fn mobile() -> Self {
        Self {
            boundary: BoundaryPolicy::Wrap,
            ledger_capacity: 10,
            ..Self::classic()
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "premium" => Some(Self::premium()),
            "mobile" => Some(Self::mobile()),
            _ => None,
        }
    }
}

impl Default for EngineRules {
    fn default() -> Self {
        Self::classic()
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfHit,
}

/// Result of one `tick` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing advanced (paused, over, or the interval has not elapsed).
    Idle,
    Moved,
    Ate,
    GameOver(Collision),
}

/// Main engine state.
#[derive(Debug, Clone)]
pub struct SnakeEngine {
    pub rules: EngineRules,

    // Field (cached from settings on reset)
    pub field_size: FieldSize,
    pub width: i32,
    pub height: i32,

    /// Snake body. Head is at the front (index 0).
    pub snake: VecDeque<Coordinate>,
    /// Direction applied on the last tick.
    pub direction: Direction,
    /// Buffered direction, applied on the next tick.
    pub next_direction: Direction,
    pub food: Coordinate,

    pub score: u32,
    pub foods_eaten: u32,
    pub game_over: bool,
    pub paused: bool,

    // Timing
    /// Current tick interval in milliseconds.
    pub interval_ms: u64,
    pub last_tick_ms: u64,
    /// Session-relative time of the last timer-driven speed increase.
    pub last_ramp_ms: u64,
    pub tick_count: u64,

    // Behaviour toggles copied from settings on reset
    pub timer_mode: bool,
    pub auto_speed_increase: bool,

    pub session: GameSession,

    pub(crate) rng: StdRng,
}

impl SnakeEngine {
    /// Create an engine and start a game at `now_ms`.
    pub fn new(rules: EngineRules, settings: &GameSettings, now_ms: u64) -> Self {
        Self::with_rng(rules, settings, now_ms, StdRng::from_entropy())
    }

    /// Create an engine with a reproducible food sequence.
    pub fn with_seed(rules: EngineRules, settings: &GameSettings, now_ms: u64, seed: u64) -> Self {
        Self::with_rng(rules, settings, now_ms, StdRng::seed_from_u64(seed))
    }

    /// An engine laid out for `settings` with no game started yet. Call
    /// `reset` to begin play.
    pub fn standby(
        rules: EngineRules,
        settings: &GameSettings,
        now_ms: u64,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut engine = Self::unstarted(rules, settings, now_ms, rng);
        engine.lay_out(settings, now_ms);
        engine
    }

    fn with_rng(rules: EngineRules, settings: &GameSettings, now_ms: u64, rng: StdRng) -> Self {
        let mut engine = Self::unstarted(rules, settings, now_ms, rng);
        engine.reset(settings, now_ms);
        engine
    }

    fn unstarted(rules: EngineRules, settings: &GameSettings, now_ms: u64, rng: StdRng) -> Self {
        Self {
            rules,
            field_size: settings.field_size,
            width: settings.field_size.width(),
            height: settings.field_size.height(),
            snake: VecDeque::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: Coordinate::new(0, 0),
            score: 0,
            foods_eaten: 0,
            game_over: false,
            paused: false,
            interval_ms: settings.initial_speed,
            last_tick_ms: now_ms,
            last_ramp_ms: 0,
            tick_count: 0,
            timer_mode: settings.timer_mode,
            auto_speed_increase: settings.auto_speed_increase,
            session: GameSession::new(now_ms, settings.field_size, settings.difficulty, 0),
            rng,
        }
    }

    pub fn head(&self) -> Coordinate {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// Speed figure shown to the player; grows as the interval shrinks.
    pub fn display_speed(&self) -> i64 {
        crate::constants::DISPLAY_SPEED_BASE - self.interval_ms as i64
    }
}

/// Horizontal snake of `length` cells centred on the field, head facing right.
pub fn spawn_snake(width: i32, height: i32, length: usize) -> VecDeque<Coordinate> {
    let center_row = height / 2;
    let center_col = width / 2;
    (0..length as i32)
        .map(|i| Coordinate::new(center_row, center_col - i))
        .collect()
}

/// Pick a random cell for food by rejection sampling.
///
/// Returns the cell and whether it is known to be free. After `attempts`
/// rejected candidates the last one is returned as-is.
pub fn spawn_food<R: Rng>(
    snake: &VecDeque<Coordinate>,
    width: i32,
    height: i32,
    attempts: u32,
    rng: &mut R,
) -> (Coordinate, bool) {
    let mut candidate = Coordinate::new(0, 0);
    for _ in 0..attempts.max(1) {
        candidate = Coordinate::new(rng.gen_range(0..height), rng.gen_range(0..width));
        if !snake.contains(&candidate) {
            return (candidate, true);
        }
    }
    (candidate, false)
}
