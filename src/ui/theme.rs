//! Colour palettes for the four themes.

use crate::settings::Theme;
use ratatui::style::Color;

pub type Rgb = (f64, f64, f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: Color,
    pub head: Color,
    pub body_bright: Rgb,
    pub body_dim: Rgb,
    pub food: Color,
    pub empty: Color,
    /// Alternate empty cell colour for the checkered grid.
    pub grid: Color,
    pub border: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Classic => Palette {
            accent: Color::LightGreen,
            head: Color::Rgb(100, 255, 100),
            body_bright: (50.0, 220.0, 50.0),
            body_dim: (20.0, 80.0, 20.0),
            food: Color::Rgb(255, 80, 40),
            empty: Color::Rgb(12, 12, 18),
            grid: Color::Rgb(22, 22, 30),
            border: Color::Rgb(80, 80, 80),
        },
        Theme::Modern => Palette {
            accent: Color::LightBlue,
            head: Color::Rgb(120, 200, 255),
            body_bright: (60.0, 150.0, 240.0),
            body_dim: (20.0, 50.0, 110.0),
            food: Color::Rgb(255, 200, 60),
            empty: Color::Rgb(16, 18, 26),
            grid: Color::Rgb(26, 30, 42),
            border: Color::Rgb(90, 100, 120),
        },
        Theme::Retro => Palette {
            accent: Color::Yellow,
            head: Color::Rgb(255, 210, 90),
            body_bright: (230.0, 170.0, 40.0),
            body_dim: (110.0, 70.0, 10.0),
            food: Color::Rgb(255, 240, 200),
            empty: Color::Rgb(20, 14, 4),
            grid: Color::Rgb(34, 24, 8),
            border: Color::Rgb(140, 100, 30),
        },
        Theme::Neon => Palette {
            accent: Color::LightMagenta,
            head: Color::Rgb(255, 90, 255),
            body_bright: (220.0, 40.0, 220.0),
            body_dim: (70.0, 10.0, 90.0),
            food: Color::Rgb(40, 255, 240),
            empty: Color::Rgb(6, 4, 14),
            grid: Color::Rgb(18, 12, 32),
            border: Color::Rgb(120, 40, 160),
        },
    }
}

/// Colour for body segment `index` of `snake_len`, fading from bright to dim.
pub fn body_color(palette: &Palette, index: usize, snake_len: usize) -> Color {
    let t = index as f64 / snake_len.saturating_sub(1).max(1) as f64;
    let (bright, dim) = (palette.body_bright, palette.body_dim);
    let r = (bright.0 * (1.0 - t) + dim.0 * t) as u8;
    let g = (bright.1 * (1.0 - t) + dim.1 * t) as u8;
    let b = (bright.2 * (1.0 - t) + dim.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// Body colour at full brightness, for legends.
pub fn body_swatch(palette: &Palette) -> Color {
    let (r, g, b) = palette.body_bright;
    Color::Rgb(r as u8, g as u8, b as u8)
}
