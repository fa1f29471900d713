//! ratatui front end: one scene per application mode.

pub mod game_common;
pub mod menu_scene;
pub mod name_input;
pub mod snake_scene;
pub mod theme;

use crate::app::runner::RenderSink;
use crate::app::Screen;
use crate::constants::{MIN_TERMINAL_COLS, MIN_TERMINAL_ROWS};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;

/// Draw one application screen into the frame.
pub fn draw_screen(frame: &mut Frame, screen: &Screen) {
    let area = frame.size();
    if area.width < MIN_TERMINAL_COLS || area.height < MIN_TERMINAL_ROWS {
        render_too_small(frame, area);
        return;
    }

    match screen {
        Screen::Menu(view) => menu_scene::render_menu(frame, area, view),
        Screen::Settings(view) => menu_scene::render_settings(frame, area, view),
        Screen::HighScores(view) => menu_scene::render_high_scores(frame, area, view),
        Screen::NameInput(view) => name_input::render_name_input(frame, area, view),
        Screen::Playing(view) => snake_scene::render_snake_scene(frame, area, view),
    }
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small: {}x{} (need {}x{})",
        area.width, area.height, MIN_TERMINAL_COLS, MIN_TERMINAL_ROWS
    );
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center),
        Rect { y, height: 1.min(area.height), ..area },
    );
}

/// Run terminal setup, calling `restore` before returning if any step fails.
pub fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            restore();
            Err(e)
        }
    }
}

/// `RenderSink` over any ratatui back end.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> RenderSink for TerminalRenderer<B> {
    fn draw(&mut self, screen: &Screen) -> io::Result<()> {
        self.terminal.draw(|frame| draw_screen(frame, screen))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, AppInput, NavAction};
    use crate::engine::EngineRules;
    use crate::storage::MemoryStore;
    use ratatui::backend::TestBackend;

    fn rendered_text(renderer: &TerminalRenderer<TestBackend>) -> String {
        renderer
            .terminal()
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: io::Result<()> = setup_or_restore(
            || Err(io::Error::new(io::ErrorKind::Other, "no tty")),
            || restored = true,
        );
        assert!(result.is_err());
        assert!(restored);

        let mut restored = false;
        let renderer = setup_or_restore(
            || TerminalRenderer::new(TestBackend::new(80, 24)),
            || restored = true,
        );
        assert!(renderer.is_ok());
        assert!(!restored);
    }

    fn renderer(width: u16, height: u16) -> TerminalRenderer<TestBackend> {
        TerminalRenderer::new(TestBackend::new(width, height)).unwrap()
    }

    #[test]
    fn test_draws_every_mode() {
        let mut app = App::with_seed(MemoryStore::shared(), EngineRules::classic(), 0, 3);
        let mut r = renderer(80, 30);

        r.draw(&app.view(0)).unwrap();
        assert!(rendered_text(&r).contains("High score: 0"));

        app.menu_index = 1;
        app.handle_input(AppInput::Nav(NavAction::Select), 0);
        r.draw(&app.view(0)).unwrap();
        assert!(rendered_text(&r).contains("Difficulty: Medium"));
        app.handle_input(AppInput::Nav(NavAction::Back), 0);

        app.menu_index = 2;
        app.handle_input(AppInput::Nav(NavAction::Select), 0);
        r.draw(&app.view(0)).unwrap();
        assert!(rendered_text(&r).contains("No scores yet"));
        app.handle_input(AppInput::Char('x'), 0);

        app.menu_index = 0;
        app.handle_input(AppInput::Nav(NavAction::Select), 0);
        r.draw(&app.view(0)).unwrap();
        assert!(rendered_text(&r).contains("Slither!"));

        app.handle_input(AppInput::Pause, 0);
        r.draw(&app.view(0)).unwrap();
        assert!(rendered_text(&r).contains("PAUSED"));
    }

    #[test]
    fn test_too_small_terminal_message() {
        let app = App::with_seed(MemoryStore::shared(), EngineRules::classic(), 0, 3);
        let mut r = renderer(40, 10);
        r.draw(&app.view(0)).unwrap();
        assert!(rendered_text(&r).contains("Terminal too small"));
    }
}
