//! Core component trait - the foundation of the UI system
//!
//! Every panel implements `Component`. Rendering reads immutable state from a
//! `RenderContext` only, so a panel can be drawn into a `TestBackend` without
//! a terminal or a running worker.

use crate::desk::Desk;
use crate::logging::LogEntry;
use crate::tui::focus::Focus;
use crate::tui::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Identity of a rendered panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// DNI input, lookup result, registration form
    Lookup,
    /// Search, trabajo filter, person table
    Directory,
    /// System logs panel
    Logs,
}

/// Immutable context passed to components during rendering
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub desk: &'a Desk,
    pub focus: Focus,
    pub log_entries: &'a [LogEntry],
    /// Animation frame counter (for spinners)
    pub animation_frame: usize,
}

impl<'a> RenderContext<'a> {
    /// Whether the focus is anywhere inside component `id`
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus.component() == id
    }

    /// Get spinner character for current animation frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

/// Base trait for all panels
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Render into `area`
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
