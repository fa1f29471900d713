//! Snake engine logic: reset, direction buffering, pause and the tick step.

use super::grid::Direction;
use super::types::*;
use crate::constants::INITIAL_SNAKE_LENGTH;
use crate::session::GameSession;
use crate::settings::GameSettings;
use log::{debug, info, warn};

/// Lower `interval` by `step`, never below `floor`. An interval already at or
/// under the floor is left alone.
fn ramp_down(interval: u64, step: u64, floor: u64) -> u64 {
    if interval <= floor {
        interval
    } else {
        interval.saturating_sub(step).max(floor)
    }
}

impl SnakeEngine {
    /// Start a fresh game with `settings` at time `now_ms`.
    pub fn reset(&mut self, settings: &GameSettings, now_ms: u64) {
        self.lay_out(settings, now_ms);
        info!(
            "session {} started: {} field {}x{}, {} at {}ms",
            self.session.id,
            self.field_size.name(),
            self.width,
            self.height,
            settings.difficulty.name(),
            self.interval_ms
        );
    }

    /// Put the board and counters in their starting state without announcing a game.
    pub(super) fn lay_out(&mut self, settings: &GameSettings, now_ms: u64) {
        self.field_size = settings.field_size;
        self.width = settings.field_size.width();
        self.height = settings.field_size.height();

        self.snake = spawn_snake(self.width, self.height, INITIAL_SNAKE_LENGTH);
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;

        self.score = 0;
        self.foods_eaten = 0;
        self.game_over = false;
        self.paused = false;

        self.interval_ms = settings.initial_speed;
        self.last_tick_ms = now_ms;
        self.last_ramp_ms = 0;
        self.tick_count = 0;
        self.timer_mode = settings.timer_mode;
        self.auto_speed_increase = settings.auto_speed_increase;

        self.place_food();

        self.session = GameSession::new(
            now_ms,
            settings.field_size,
            settings.difficulty,
            self.snake.len(),
        );
    }

    /// Buffer a direction for the next tick.
    ///
    /// Returns false (and changes nothing) when the game is over, paused, or
    /// `direction` reverses the direction applied on the last tick.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.game_over || self.paused {
            return false;
        }
        if direction.is_opposite_of(self.direction) {
            return false;
        }
        self.next_direction = direction;
        true
    }

    /// Flip the pause flag. Entering pause is counted on the session.
    /// Returns the new pause state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return self.paused;
        }
        self.paused = !self.paused;
        if self.paused {
            self.session.pauses_count += 1;
        }
        debug!("session {} paused={}", self.session.id, self.paused);
        self.paused
    }

    /// Re-roll the food position.
    pub fn place_food(&mut self) {
        let (food, free) = spawn_food(
            &self.snake,
            self.width,
            self.height,
            self.rules.food_placement_attempts,
            &mut self.rng,
        );
        if !free {
            warn!(
                "no free cell found for food after {} attempts; placing at {:?}",
                self.rules.food_placement_attempts, food
            );
        }
        self.food = food;
    }

    /// Advance the simulation to `now_ms`.
    ///
    /// Safe to call every frame: nothing happens until `interval_ms` has
    /// elapsed since the last applied step.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if self.paused || self.game_over {
            return TickOutcome::Idle;
        }
        if now_ms.saturating_sub(self.last_tick_ms) < self.interval_ms {
            return TickOutcome::Idle;
        }
        self.last_tick_ms = now_ms;

        let outcome = self.step(now_ms);
        if !matches!(outcome, TickOutcome::GameOver(_)) {
            self.apply_time_ramp(now_ms);
        }
        outcome
    }

    /// Single movement step.
    fn step(&mut self, now_ms: u64) -> TickOutcome {
        self.tick_count += 1;
        self.session.moves_made += 1;

        // Apply buffered direction
        self.direction = self.next_direction;

        let mut new_head = self.head() + self.direction;

        // Wall
        if !new_head.in_bounds(self.width, self.height) {
            match self.rules.boundary {
                BoundaryPolicy::Terminate => return self.end_game(Collision::Wall, now_ms),
                BoundaryPolicy::Wrap => new_head = new_head.wrapped(self.width, self.height),
            }
        }

        // Self collision is checked against the body before it moves, tail included.
        if self.snake.contains(&new_head) {
            return self.end_game(Collision::SelfHit, now_ms);
        }

        self.snake.push_front(new_head);

        if new_head == self.food {
            // Grow (keep tail) and score
            self.score += self.rules.food_reward;
            self.foods_eaten += 1;
            self.session.score = self.score;
            self.session.foods_eaten = self.foods_eaten;
            self.session.record_length(self.snake.len());

            self.place_food();

            if self.auto_speed_increase {
                self.interval_ms = ramp_down(
                    self.interval_ms,
                    self.rules.food_speed_step_ms,
                    self.rules.food_speed_floor_ms,
                );
            }
            TickOutcome::Ate
        } else {
            self.snake.pop_back();
            TickOutcome::Moved
        }
    }

    /// Timer-mode speed-up: once per `time_ramp_every_ms` of session time.
    fn apply_time_ramp(&mut self, now_ms: u64) {
        if !(self.timer_mode && self.auto_speed_increase) {
            return;
        }
        let elapsed = self.session.elapsed_ms(now_ms);
        if elapsed.saturating_sub(self.last_ramp_ms) >= self.rules.time_ramp_every_ms {
            self.interval_ms = ramp_down(
                self.interval_ms,
                self.rules.time_speed_step_ms,
                self.rules.time_speed_floor_ms,
            );
            self.last_ramp_ms = elapsed;
            debug!(
                "session {} speed-up at {}ms: interval {}ms",
                self.session.id, elapsed, self.interval_ms
            );
        }
    }

    fn end_game(&mut self, collision: Collision, now_ms: u64) -> TickOutcome {
        self.game_over = true;
        self.session.score = self.score;
        self.session.foods_eaten = self.foods_eaten;
        self.session.finish(now_ms);
        info!(
            "session {} over ({:?}): score {}, length {}, {} moves",
            self.session.id,
            collision,
            self.score,
            self.snake.len(),
            self.session.moves_made
        );
        TickOutcome::GameOver(collision)
    }

    /// Close the session without a collision (player quit mid-game).
    pub fn abandon(&mut self, now_ms: u64) {
        if !self.game_over {
            self.session.score = self.score;
            self.session.foods_eaten = self.foods_eaten;
            self.session.finish(now_ms);
        }
    }
}
