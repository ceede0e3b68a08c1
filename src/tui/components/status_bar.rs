// Status bar component
//
// Key hints for whatever has focus, then the global keys.

use crate::lookup::FormField;
use super::LogsPanel;
use crate::tui::focus::Focus;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const GLOBAL_HINT: &str = "Tab:foco  F1:ayuda  F5:refrescar  F9:logs  Ctrl+C:salir";

/// Hints for the focused element
pub fn focus_hint(ctx: &RenderContext) -> &'static str {
    let lookup = &ctx.desk.lookup;
    match ctx.focus {
        Focus::Dni if lookup.found().is_some() => "Enter:buscar  Ctrl+Y:copiar",
        Focus::Dni => "Enter:buscar",
        Focus::Form(_) if lookup.is_submitting() => "Guardando...",
        Focus::Form(FormField::Trabajo) => "←→:trabajo  Enter:guardar  Esc:cancelar",
        Focus::Form(_) => "Enter:guardar  Esc:cancelar",
        Focus::Search => "escribir para buscar",
        Focus::Filter => "←→:trabajo",
        Focus::Table => "↑↓:seleccionar  y:copiar  d:eliminar  q:salir",
        Focus::Logs => LogsPanel::FOCUS_HINT,
    }
}

pub fn render(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let theme = ctx.theme;
    let hint = focus_hint(ctx);

    let line = Line::from(vec![
        Span::styled(format!(" {}", hint), Style::default().fg(theme.foreground)),
        Span::styled(" │ ", Style::default().fg(theme.border)),
        Span::styled(GLOBAL_HINT, Style::default().fg(theme.status_bar)),
    ]);

    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border)),
    );

    f.render_widget(status, area);
}
