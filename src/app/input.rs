//! UI-agnostic input events for the application state machine.

use crate::engine::Direction;

/// Menu navigation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    Select,
    Back,
}

/// Every input the state machine understands. Front ends translate raw
/// keys or touches into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInput {
    Direction(Direction),
    Nav(NavAction),
    /// A character typed during name entry.
    Char(char),
    Backspace,
    Pause,
    Quit,
    Restart,
    /// Ctrl+C or a signal: leave the application from any mode.
    Interrupt,
}

impl AppInput {
    /// Vertical movement for menus, from either arrows or navigation.
    pub fn vertical(&self) -> Option<NavAction> {
        match self {
            AppInput::Direction(Direction::Up) | AppInput::Nav(NavAction::Up) => Some(NavAction::Up),
            AppInput::Direction(Direction::Down) | AppInput::Nav(NavAction::Down) => {
                Some(NavAction::Down)
            }
            _ => None,
        }
    }
}
