//! Keyboard input for the terminal front end.
//!
//! Maps crossterm key events onto `AppInput`. While a name is being typed,
//! letters arrive as characters; otherwise WASD steer the snake and single
//! letters are commands.

use crate::app::runner::InputSource;
use crate::app::{AppInput, NavAction};
use crate::engine::Direction;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// Translate one key press. Returns `None` for keys with no meaning.
pub fn map_key(key: KeyEvent, text_entry: bool) -> Option<AppInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(AppInput::Interrupt);
    }

    match key.code {
        KeyCode::Up => Some(AppInput::Direction(Direction::Up)),
        KeyCode::Down => Some(AppInput::Direction(Direction::Down)),
        KeyCode::Left => Some(AppInput::Direction(Direction::Left)),
        KeyCode::Right => Some(AppInput::Direction(Direction::Right)),
        KeyCode::Enter => Some(AppInput::Nav(NavAction::Select)),
        KeyCode::Esc => Some(AppInput::Nav(NavAction::Back)),
        KeyCode::Backspace => Some(AppInput::Backspace),
        KeyCode::Char(c) if text_entry => Some(AppInput::Char(c)),
        KeyCode::Char(' ') => Some(AppInput::Nav(NavAction::Select)),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(AppInput::Direction(Direction::Up)),
            's' => Some(AppInput::Direction(Direction::Down)),
            'a' => Some(AppInput::Direction(Direction::Left)),
            'd' => Some(AppInput::Direction(Direction::Right)),
            'p' => Some(AppInput::Pause),
            'q' => Some(AppInput::Quit),
            'r' => Some(AppInput::Restart),
            _ => Some(AppInput::Char(c)),
        },
        _ => None,
    }
}

/// `InputSource` reading crossterm events without blocking.
pub struct KeyboardInput {
    poll_timeout: Duration,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self {
            poll_timeout: Duration::ZERO,
        }
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyboardInput {
    fn poll_input(&mut self, text_entry: bool) -> io::Result<Option<AppInput>> {
        // Skip events that map to nothing so the caller sees "no input"
        // only when the queue is empty.
        while event::poll(self.poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key, text_entry) {
                    return Ok(Some(input));
                }
            }
        }
        Ok(None)
    }
}
