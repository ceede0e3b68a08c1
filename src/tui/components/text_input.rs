// Bordered single-line input for a `TextField`
//
// When focused the terminal cursor is placed at the field's cursor column.
// An empty field shows its placeholder in the muted color.

use crate::field::TextField;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct TextInput<'a> {
    pub label: &'a str,
    pub field: &'a TextField,
    pub placeholder: &'a str,
    pub focused: bool,
    /// Read-only while a request is in flight
    pub enabled: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(label: &'a str, field: &'a TextField) -> Self {
        Self {
            label,
            field,
            placeholder: "",
            focused: false,
            enabled: true,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Needs 3 rows: border, text, border
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.focused {
            theme.highlight
        } else {
            theme.border
        };

        let (text, style) = if self.field.is_empty() {
            (self.placeholder, Style::default().fg(theme.muted))
        } else if self.enabled {
            (self.field.value(), Style::default().fg(theme.foreground))
        } else {
            (self.field.value(), Style::default().fg(theme.muted))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", self.label));

        f.render_widget(Paragraph::new(text).style(style).block(block), area);

        if self.focused && self.enabled && area.width > 2 && area.height > 2 {
            let max_col = area.width.saturating_sub(3) as usize;
            let col = self.field.cursor_column().min(max_col) as u16;
            f.set_cursor_position(Position::new(area.x + 1 + col, area.y + 1));
        }
    }
}
