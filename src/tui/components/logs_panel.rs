//! Logs panel component
//!
//! Displays captured tracing events. Follows the tail until the user selects
//! an entry; Esc returns to follow mode.

use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::tui::theme::Theme;
use crate::tui::traits::{Component, ComponentId, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub struct LogsPanel {
    /// Shared with the tracing layer; read for copy and bounds
    buffer: LogBuffer,

    /// Selected log entry index (None = follow the tail)
    pub selected: Option<usize>,
}

impl LogsPanel {
    pub fn new(buffer: LogBuffer) -> Self {
        Self {
            buffer,
            selected: None,
        }
    }

    fn entry_count(&self) -> usize {
        self.buffer.len()
    }

    fn select_previous(&mut self) {
        let count = self.entry_count();
        self.selected = match self.selected {
            Some(idx) => Some(idx.saturating_sub(1)),
            // First selection starts at the most recent entry
            None => count.checked_sub(1),
        };
    }

    fn select_next(&mut self) {
        let count = self.entry_count();
        self.selected = match self.selected {
            Some(idx) => Some((idx + 1).min(count.saturating_sub(1))),
            None => count.checked_sub(1),
        };
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let entries = ctx.log_entries;
        let focused = ctx.is_focused(self.id());

        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, theme))
            })
            .collect();

        let border_color = if focused {
            theme.highlight
        } else {
            theme.border
        };

        let title = if self.selected.is_some() && focused {
            " Registro del sistema [selección] "
        } else {
            " Registro del sistema "
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .highlight_style(
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            );

        // Follow mode pins the last entry to the bottom without highlighting it
        let mut state = match self.selected {
            Some(idx) if focused => {
                let last = entries.len().saturating_sub(1);
                ListState::default().with_selected(Some(idx.min(last)))
            }
            _ => {
                let visible = area.height.saturating_sub(2) as usize;
                ListState::default().with_offset(entries.len().saturating_sub(visible))
            }
        };
        f.render_stateful_widget(list, area, &mut state);
    }
}

impl LogsPanel {
    /// Status bar hint while the panel has focus
    pub const FOCUS_HINT: &'static str = "↑↓:seleccionar  y:copiar  Esc:seguir";

    /// Selected entry as one line, `None` while following the tail
    pub fn copy_text(&self) -> Option<String> {
        let idx = self.selected?;
        self.buffer.get_all().get(idx).map(format_log_entry)
    }

    /// Returns false for keys the panel leaves to the caller
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home => {
                if self.entry_count() > 0 {
                    self.selected = Some(0);
                }
            }
            KeyCode::End => self.selected = self.entry_count().checked_sub(1),
            // Leaving selection returns to follow mode
            KeyCode::Esc if self.selected.is_some() => self.selected = None,
            _ => return false,
        }
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════════════════════

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.target,
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warning),
        LogLevel::Info => Style::default().fg(theme.log_info),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.log_debug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            target: "dni_desk".to_string(),
            message: message.to_string(),
        }
    }

    fn press(panel: &mut LogsPanel, code: KeyCode) -> bool {
        panel.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_first_selection_starts_at_latest() {
        let buffer = LogBuffer::new();
        for message in ["uno", "dos", "tres"] {
            buffer.add(entry(message));
        }
        let mut panel = LogsPanel::new(buffer);

        press(&mut panel, KeyCode::Up);
        assert_eq!(panel.selected, Some(2));
        press(&mut panel, KeyCode::Up);
        assert!(panel.copy_text().unwrap().ends_with("dos"));

        press(&mut panel, KeyCode::Down);
        press(&mut panel, KeyCode::Down);
        assert_eq!(panel.selected, Some(2));
    }

    #[test]
    fn test_copied_entry_names_its_target() {
        let buffer = LogBuffer::new();
        buffer.add(entry("Backend unreachable"));
        let mut panel = LogsPanel::new(buffer);

        press(&mut panel, KeyCode::End);
        let text = panel.copy_text().unwrap();
        assert!(text.contains("INFO  dni_desk: Backend unreachable"));
    }

    #[test]
    fn test_esc_returns_to_follow_mode() {
        let buffer = LogBuffer::new();
        buffer.add(entry("uno"));
        let mut panel = LogsPanel::new(buffer);

        assert!(!press(&mut panel, KeyCode::Esc));
        press(&mut panel, KeyCode::End);
        assert!(press(&mut panel, KeyCode::Esc));
        assert_eq!(panel.selected, None);
        assert_eq!(panel.copy_text(), None);
    }
}
