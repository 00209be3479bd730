//! Colors and styles.

use ratatui::style::Color;

/// Color scheme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub fg: Color,
    pub border: Color,
    pub highlight: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub error: Color,
    pub muted: Color,
}

/// The active color scheme.
pub fn colors() -> ThemeColors {
    ThemeColors {
        fg: Color::Rgb(212, 212, 212),
        border: Color::Rgb(62, 62, 62),
        highlight: Color::Rgb(0, 122, 204),
        selected_bg: Color::Rgb(38, 79, 120),
        selected_fg: Color::White,
        error: Color::Rgb(244, 135, 113),
        muted: Color::DarkGray,
    }
}
