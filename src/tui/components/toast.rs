//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after two seconds.
//! Renders in the bottom-right corner on top of all other content.

use crate::commands::{Notice, NoticeKind};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

pub const TOAST_DURATION: Duration = Duration::from_secs(2);

pub struct Toast {
    pub message: String,
    pub kind: NoticeKind,
    created_at: Instant,
}

impl Toast {
    pub fn new(notice: Notice) -> Self {
        Self {
            message: notice.text,
            kind: notice.kind,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }

    /// Render in the bottom-right corner over a `Clear`ed area
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // 2 chars padding each side plus borders
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height);

        let accent = match self.kind {
            NoticeKind::Success => theme.success,
            NoticeKind::Error => theme.error,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}
