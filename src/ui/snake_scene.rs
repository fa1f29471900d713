//! Play field rendering.
//!
//! Uses half-block pixel rendering. Each game cell maps to a coloured pixel;
//! pairs of vertical pixels are packed into one terminal row using the `▀`
//! (upper half block) character with fg=top, bg=bottom colours.

use super::game_common::{
    create_game_layout, render_banner, render_info_panel_frame, render_status_bar,
};
use super::theme::{body_color, body_swatch, palette, Palette};
use crate::app::PlayView;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

/// Render the play screen.
pub fn render_snake_scene(frame: &mut Frame, area: Rect, view: &PlayView) {
    let colors = palette(view.theme);
    let layout = create_game_layout(frame, area, " Snake ", colors.accent, 10, 22);

    render_play_field(frame, layout.content, view, &colors);

    if view.game_over {
        render_banner(
            frame,
            layout.content,
            Color::Red,
            "GAME OVER",
            &format!("Score {} after {}", view.score, view.timer),
        );
    } else if view.paused {
        render_banner(
            frame,
            layout.content,
            Color::Yellow,
            "PAUSED",
            "Press P to resume",
        );
    }

    render_status_bar_content(frame, layout.status_bar, view, &colors);
    render_info_panel(frame, layout.info_panel, view, &colors);
}

/// Pixel colour grid in game coordinates, `None` for empty cells.
pub(crate) fn pixel_grid(view: &PlayView, colors: &Palette) -> Vec<Vec<Option<Color>>> {
    let grid_w = view.width.max(0) as usize;
    let grid_h = view.height.max(0) as usize;
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; grid_w]; grid_h];

    let mut paint = |row: i32, col: i32, color: Color| {
        if row >= 0 && col >= 0 && (row as usize) < grid_h && (col as usize) < grid_w {
            pixels[row as usize][col as usize] = Some(color);
        }
    };

    paint(view.food.row, view.food.col, colors.food);

    let snake_len = view.snake.len();
    for (i, seg) in view.snake.iter().enumerate() {
        let color = if i == 0 {
            colors.head
        } else {
            body_color(colors, i, snake_len)
        };
        paint(seg.row, seg.col, color);
    }

    pixels
}

fn empty_color(colors: &Palette, show_grid: bool, row: usize, col: usize) -> Color {
    if show_grid && (row + col) % 2 == 1 {
        colors.grid
    } else {
        colors.empty
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, view: &PlayView, colors: &Palette) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let pixels = pixel_grid(view, colors);
    let grid_w = view.width.max(0) as usize;
    let grid_h = pixels.len();
    let border = Style::default().fg(colors.border);

    let content_rows = grid_h.div_ceil(2);
    let render_w = ((grid_w + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;
    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;

    // ── Top border with score ───────────────────────────────────
    {
        let score_val = view.score.to_string();
        let label = "Score: ";
        let score_full_len = label.len() + score_val.len();
        let pad_before = inner_w.saturating_sub(score_full_len + 1);
        let pad_after = inner_w.saturating_sub(pad_before + score_full_len);

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_TL.to_string(), border)];
        if pad_before > 0 {
            spans.push(Span::styled(
                std::iter::repeat(BORDER_H).take(pad_before).collect::<String>(),
                border,
            ));
        }
        spans.push(Span::styled(label, border));
        spans.push(Span::styled(score_val, Style::default().fg(Color::White)));
        if pad_after > 0 {
            spans.push(Span::styled(
                std::iter::repeat(BORDER_H).take(pad_after).collect::<String>(),
                border,
            ));
        }
        spans.push(Span::styled(BORDER_TR.to_string(), border));
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_off, y_off, render_w, 1),
        );
    }

    // ── Cells ───────────────────────────────────────────────────
    for term_row in 0..content_rows {
        let row_y = y_off + 1 + term_row as u16;
        if row_y >= area.y + area.height {
            break;
        }
        let top_gy = term_row * 2;
        let bot_gy = term_row * 2 + 1;

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_V.to_string(), border)];

        // Batch consecutive cells with the same colours
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for gx in 0..grid_w.min(inner_w) {
            let fg = pixels[top_gy][gx]
                .unwrap_or_else(|| empty_color(colors, view.show_grid, top_gy, gx));
            let bg = if bot_gy < grid_h {
                pixels[bot_gy][gx]
                    .unwrap_or_else(|| empty_color(colors, view.show_grid, bot_gy, gx))
            } else {
                Color::Reset
            };

            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }

        spans.push(Span::styled(BORDER_V.to_string(), border));
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_off, row_y, render_w, 1),
        );
    }

    // ── Bottom border ───────────────────────────────────────────
    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        let mut s = String::new();
        s.push(BORDER_BL);
        s.extend(std::iter::repeat(BORDER_H).take(inner_w));
        s.push(BORDER_BR);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(s, border))),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, view: &PlayView, colors: &Palette) {
    if view.game_over {
        render_status_bar(
            frame,
            area,
            "Game over",
            Color::Red,
            &[("[Enter/Q]", "Continue"), ("[R]", "Restart")],
        );
    } else if view.paused {
        render_status_bar(
            frame,
            area,
            "Paused",
            Color::Yellow,
            &[("[P]", "Resume"), ("[Q]", "Menu")],
        );
    } else {
        render_status_bar(
            frame,
            area,
            "Slither!",
            colors.accent,
            &[("[Arrows]", "Move"), ("[P]", "Pause"), ("[Q]", "Menu")],
        );
    }
}

fn info_row<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn legend_row(label: &str, color: Color) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(color)),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, view: &PlayView, colors: &Palette) {
    let inner = render_info_panel_frame(frame, area);

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        info_row("Best: ", view.high_score.to_string(), Color::Yellow),
        info_row("Time: ", view.timer.clone(), Color::White),
        Line::from(""),
        info_row("Food: ", view.foods_eaten.to_string(), Color::White),
        info_row("Length: ", view.snake.len().to_string(), Color::White),
        info_row(
            "Speed: ",
            format!("{} ({}ms)", view.speed, view.interval_ms),
            Color::White,
        ),
        info_row(
            "Field: ",
            format!("{} {}x{}", view.field_name, view.width, view.height),
            Color::Cyan,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        legend_row("Head", colors.head),
        legend_row("Body", body_swatch(colors)),
        legend_row("Food", colors.food),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Coordinate;
    use crate::settings::Theme;

    fn view() -> PlayView {
        PlayView {
            snake: vec![
                Coordinate::new(5, 7),
                Coordinate::new(5, 6),
                Coordinate::new(5, 5),
            ],
            food: Coordinate::new(5, 8),
            width: 15,
            height: 10,
            score: 0,
            high_score: 0,
            timer: "00:00".to_string(),
            speed: 50,
            foods_eaten: 0,
            paused: false,
            game_over: false,
            show_grid: true,
            theme: Theme::Classic,
            field_name: "Small",
            interval_ms: 150,
        }
    }

    #[test]
    fn test_pixel_grid_marks_snake_and_food() {
        let v = view();
        let colors = palette(v.theme);
        let pixels = pixel_grid(&v, &colors);
        assert_eq!(pixels.len(), 10);
        assert_eq!(pixels[0].len(), 15);
        assert_eq!(pixels[5][7], Some(colors.head));
        assert_eq!(pixels[5][8], Some(colors.food));
        assert!(pixels[5][5].is_some());
        assert_eq!(pixels[0][0], None);
    }

    #[test]
    fn test_pixel_grid_ignores_out_of_range_cells() {
        let mut v = view();
        v.food = Coordinate::new(-1, 40);
        let pixels = pixel_grid(&v, &palette(v.theme));
        assert_eq!(pixels.iter().flatten().filter(|p| p.is_some()).count(), 3);
    }

    #[test]
    fn test_grid_checker_only_when_enabled() {
        let colors = palette(Theme::Neon);
        assert_eq!(empty_color(&colors, true, 0, 1), colors.grid);
        assert_eq!(empty_color(&colors, true, 1, 1), colors.empty);
        assert_eq!(empty_color(&colors, false, 0, 1), colors.empty);
    }
}
