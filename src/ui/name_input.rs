use super::game_common::centered_rect;
use crate::app::NameInputView;
use crate::constants::{ANONYMOUS_NAME, MAX_NAME_LENGTH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Name buffer with a `_` cursor inserted at `cursor` (in characters).
pub fn input_text(name: &str, cursor: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    let cursor = cursor.min(chars.len());
    let before: String = chars[..cursor].iter().collect();
    let after: String = chars[cursor..].iter().collect();
    format!("{}_{}", before, after)
}

pub fn render_name_input(frame: &mut Frame, area: Rect, view: &NameInputView) {
    let panel = centered_rect(area, 56, 20);
    frame.render_widget(Clear, panel);

    let border_color = if view.is_new_record {
        Color::Yellow
    } else {
        Color::Red
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Game Over ");
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Result summary
            Constraint::Length(1), // Spacer
            Constraint::Length(4), // Input label + field
            Constraint::Length(2), // Rules
            Constraint::Min(0),
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    let title = if view.is_new_record {
        Line::from(Span::styled(
            "NEW HIGH SCORE!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "The snake has fallen",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    };
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[0]);

    let summary = vec![
        Line::from(format!("Score: {}", view.score)),
        Line::from(format!("Food eaten: {}", view.foods_eaten)),
        Line::from(format!("Time: {}", view.timer)),
    ];
    frame.render_widget(
        Paragraph::new(summary)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White)),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new("Enter your name:").alignment(Alignment::Center),
        chunks[3],
    );

    let field = chunks[3];
    let input_area = Rect {
        x: field.x + field.width.saturating_sub(30) / 2,
        y: field.y + 1,
        width: 30.min(field.width),
        height: 3.min(field.height.saturating_sub(1)),
    };
    let input_widget = Paragraph::new(input_text(&view.name, view.cursor))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);
    frame.render_widget(input_widget, input_area);

    let rules = Paragraph::new(format!(
        "Up to {} characters. Blank saves as {}.",
        MAX_NAME_LENGTH, ANONYMOUS_NAME
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(rules, chunks[4]);

    let controls = Paragraph::new("[Enter] Save score    [Esc] Skip")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(controls, chunks[6]);
}
