//! Grid primitives: cell coordinates and the four movement directions.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (d_row, d_col) delta for this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    pub fn is_opposite_of(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// A cell on the field, addressed as (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True when the cell lies inside a `width` x `height` field.
    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.row >= 0 && self.row < height && self.col >= 0 && self.col < width
    }

    /// Fold an out-of-bounds cell back onto the field (torus topology).
    pub fn wrapped(&self, width: i32, height: i32) -> Self {
        Self {
            row: self.row.rem_euclid(height),
            col: self.col.rem_euclid(width),
        }
    }
}

impl Add<Direction> for Coordinate {
    type Output = Coordinate;

    fn add(self, direction: Direction) -> Coordinate {
        let (d_row, d_col) = direction.delta();
        Coordinate {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}
