//! The snake simulation: grid primitives, engine state and the tick rules.

pub mod grid;
pub mod logic;
pub mod types;

pub use grid::{Coordinate, Direction};
pub use types::{
    spawn_food, spawn_snake, BoundaryPolicy, Collision, EngineRules, SnakeEngine, TickOutcome,
};
