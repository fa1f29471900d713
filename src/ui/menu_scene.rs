//! Main menu, settings and high-score screens.

use super::game_common::{controls_line, render_centered_panel};
use crate::app::{HighScoresView, MenuView, SettingsView};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

const TITLE_ART: [&str; 5] = [
    " ____              _        ",
    "/ ___| _ __   __ _| | _____ ",
    "\\___ \\| '_ \\ / _` | |/ / _ \\",
    " ___) | | | | (_| |   <  __/",
    "|____/|_| |_|\\__,_|_|\\_\\___|",
];

/// Selectable rows with a `> ` marker on the selected one.
fn selectable_items(items: &[String], selected: usize, accent: Color) -> Vec<ListItem<'_>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let prefix = if i == selected { "> " } else { "  " };
            let style = if i == selected {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("{}{}", prefix, item)).style(style)
        })
        .collect()
}

fn render_help(frame: &mut Frame, inner: Rect, controls: &[(&str, &str)]) {
    if inner.height == 0 {
        return;
    }
    let help_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };
    frame.render_widget(Paragraph::new(controls_line(controls)), help_area);
}

pub fn render_menu(frame: &mut Frame, area: Rect, view: &MenuView) {
    let height = (TITLE_ART.len() + view.items.len() + 7) as u16;
    let inner = render_centered_panel(frame, area, " Snake ", Color::LightGreen, 40, height);

    let mut lines: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| Line::styled(*row, Style::default().fg(Color::Green)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::styled(
        format!("High score: {}", view.high_score),
        Style::default().fg(Color::Yellow),
    ));
    frame.render_widget(Paragraph::new(lines), inner);

    let list_y = inner.y + TITLE_ART.len() as u16 + 3;
    let list_area = Rect {
        y: list_y.min(inner.y + inner.height),
        height: (view.items.len() as u16).min((inner.y + inner.height).saturating_sub(list_y)),
        ..inner
    };
    let items = selectable_items(&view.items, view.selected, Color::Yellow);
    frame.render_widget(List::new(items), list_area);

    render_help(
        frame,
        inner,
        &[("[↑/↓]", "Navigate"), ("[Enter]", "Select"), ("[Q]", "Quit")],
    );
}

pub fn render_settings(frame: &mut Frame, area: Rect, view: &SettingsView) {
    let height = (view.items.len() + 6) as u16;
    let inner = render_centered_panel(frame, area, " Settings ", Color::Cyan, 48, height);

    let list_area = Rect {
        height: (view.items.len() as u16).min(inner.height),
        ..inner
    };
    let items = selectable_items(&view.items, view.selected, Color::Cyan);
    frame.render_widget(List::new(items), list_area);

    if let Some(hint) = &view.hint {
        let hint_y = inner.y + view.items.len() as u16 + 1;
        if hint_y + 1 < inner.y + inner.height {
            frame.render_widget(
                Paragraph::new(hint.as_str()).style(Style::default().fg(Color::DarkGray)),
                Rect {
                    y: hint_y,
                    height: 1,
                    ..inner
                },
            );
        }
    }

    render_help(
        frame,
        inner,
        &[("[↑/↓]", "Navigate"), ("[Enter]", "Change"), ("[Esc]", "Save & back")],
    );
}

pub fn render_high_scores(frame: &mut Frame, area: Rect, view: &HighScoresView) {
    let height = area.height.saturating_sub(2).max(8);
    let title = format!(" High Scores (top {}) ", view.capacity);
    let inner = render_centered_panel(frame, area, &title, Color::Yellow, 64, height);

    if view.entries.is_empty() {
        frame.render_widget(
            Paragraph::new("No scores yet. Go play!").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    } else {
        let header = Row::new(["#", "Name", "Score", "Food", "Field", "Date"])
            .style(Style::default().fg(Color::DarkGray));
        let rows = view.entries.iter().enumerate().map(|(i, entry)| {
            let style = if i == 0 {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(entry.name.clone()),
                Cell::from(entry.score.to_string()),
                Cell::from(entry.foods_eaten.to_string()),
                Cell::from(entry.field_size.clone()),
                Cell::from(entry.timestamp.get(..10).unwrap_or(&entry.timestamp).to_string()),
            ])
            .style(style)
        });
        let widths = [
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(10),
        ];
        let table_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        frame.render_widget(Table::new(rows, widths).header(header), table_area);
    }

    render_help(frame, inner, &[("[Any key]", "Back")]);
}
