// Title bar component
//
// App heading plus the backend URL and its last known reachability.

use crate::directory::BackendStatus;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, ctx: &RenderContext, api_url: &str) {
    let theme = ctx.theme;

    let status = match ctx.desk.directory.status() {
        BackendStatus::Checking => Span::styled(
            format!("{} comprobando ", ctx.spinner_char()),
            Style::default().fg(theme.warning),
        ),
        BackendStatus::Online => Span::styled("● en línea ", Style::default().fg(theme.success)),
        BackendStatus::Offline => {
            Span::styled("● sin conexión ", Style::default().fg(theme.error))
        }
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Gestión de DNI",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ──── {}", api_url), Style::default().fg(theme.muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title_top(Line::from(status).right_aligned()),
    );

    f.render_widget(title, area);
}
