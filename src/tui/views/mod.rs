// Views module - screen-level rendering logic
//
// One screen: title bar, lookup panel beside (or above, on narrow
// terminals) the directory panel, optional logs, status bar. Modals and the
// toast are layered on top.

mod modal;

use super::app::App;
use crate::tui::components::{status_bar, title_bar};
use crate::tui::traits::{Component, RenderContext};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Below this width the two panels stack vertically
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 110;

/// Rows the lookup panel needs with the registration form open
const LOOKUP_PANEL_HEIGHT: u16 = 19;

const LOGS_PANEL_HEIGHT: u16 = 10;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let log_entries = if app.show_logs {
        app.log_buffer.get_all()
    } else {
        Vec::new()
    };

    let ctx = RenderContext {
        theme: &app.theme,
        desk: &app.desk,
        focus: app.focus,
        log_entries: &log_entries,
        animation_frame: app.animation_frame,
    };

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(10)];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_PANEL_HEIGHT));
    }
    constraints.push(Constraint::Length(2));
    let chunks = Layout::vertical(constraints).split(f.area());

    title_bar::render(f, chunks[0], &ctx, &app.api_url);

    let (lookup_area, directory_area) = split_body(chunks[1]);
    app.lookup_panel.render(f, lookup_area, &ctx);
    app.directory_panel.render(f, directory_area, &ctx);

    if app.show_logs {
        app.logs_panel.render(f, chunks[2], &ctx);
    }

    let status_area = chunks[chunks.len() - 1];
    status_bar::render(f, status_area, &ctx);

    // Render modal overlay (on top of everything)
    if let Some(modal_state) = &app.modal {
        modal::render(f, modal_state, &ctx);
    }

    // Render toast notification (on top of modal too)
    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    // Clear expired toast after render
    app.clear_expired_toast();
}

fn split_body(area: Rect) -> (Rect, Rect) {
    if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(area);
        (left, right)
    } else {
        let [top, bottom] =
            Layout::vertical([Constraint::Length(LOOKUP_PANEL_HEIGHT), Constraint::Min(8)])
                .areas(area);
        (top, bottom)
    }
}
