// Theme system for the TUI
//
// Two palettes, selected by name from config and switchable at runtime.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light]
    }

    /// Parse a config name; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    /// Border of the focused panel
    pub highlight: Color,
    pub border_type: BorderType,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Selection
    pub selection: Color,
    pub selection_fg: Color,

    // Feedback
    pub muted: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,

    // Log levels
    pub log_info: Color,
    pub log_debug: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::Rgb(24, 26, 33),
            foreground: Color::Rgb(220, 223, 228),
            border: Color::Rgb(92, 99, 112),
            highlight: Color::Rgb(97, 175, 239),
            border_type: BorderType::Rounded,
            title: Color::Rgb(97, 175, 239),
            status_bar: Color::Rgb(150, 156, 168),
            selection: Color::Rgb(62, 68, 81),
            selection_fg: Color::Rgb(255, 255, 255),
            muted: Color::Rgb(110, 118, 129),
            success: Color::Rgb(152, 195, 121),
            error: Color::Rgb(224, 108, 117),
            warning: Color::Rgb(229, 192, 123),
            log_info: Color::Rgb(86, 182, 194),
            log_debug: Color::Rgb(110, 118, 129),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            border: Color::Rgb(160, 161, 167),
            highlight: Color::Rgb(64, 120, 242),
            border_type: BorderType::Rounded,
            title: Color::Rgb(64, 120, 242),
            status_bar: Color::Rgb(105, 108, 119),
            selection: Color::Rgb(208, 218, 240),
            selection_fg: Color::Rgb(18, 20, 26),
            muted: Color::Rgb(150, 152, 160),
            success: Color::Rgb(80, 161, 79),
            error: Color::Rgb(228, 86, 73),
            warning: Color::Rgb(193, 132, 1),
            log_info: Color::Rgb(1, 132, 188),
            log_debug: Color::Rgb(150, 152, 160),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
