// Modal overlay rendering
//
// Modals are rendered centered on top of the main content:
// - Help: keyboard shortcuts and current theme
// - Delete confirmation
// - Backend offline notice

use crate::tui::modal::Modal;
use crate::tui::theme::Theme;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub const OFFLINE_TITLE: &str = "🔴 Servidor Local Apagado";
pub const OFFLINE_BODY: &str = "La aplicación no puede conectarse con la base de datos local.";
pub const CONFIRM_DELETE: &str = "¿Está seguro de que desea eliminar a esta persona?";

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, ctx: &RenderContext) {
    match modal {
        Modal::Help => render_help(f, ctx.theme),
        Modal::ConfirmDelete { dni, name } => render_confirm_delete(f, ctx.theme, dni, name),
        Modal::BackendOffline => render_offline(f, ctx),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn dialog_block<'a>(theme: &Theme, accent: Color, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .border_type(theme.border_type)
        .title(title)
}

/// Render the help modal overlay
fn render_help(f: &mut Frame, theme: &Theme) {
    let key_style = Style::default().fg(theme.highlight);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Consulta", header_style)),
        kb("Enter", "Buscar DNI / guardar registro"),
        kb("Esc", "Cancelar registro"),
        kb("←/→", "Cambiar trabajo"),
        kb("Ctrl+Y", "Copiar persona encontrada"),
        Line::raw(""),
        Line::from(Span::styled("  Listado", header_style)),
        kb("↑/↓", "Seleccionar fila"),
        kb("y", "Copiar fila"),
        kb("d, Supr", "Eliminar fila"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("Tab", "Siguiente campo"),
        kb("Shift+Tab", "Campo anterior"),
        kb("F1", "Mostrar/ocultar ayuda"),
        kb("F2", "Cambiar tema"),
        kb("F5", "Refrescar listado"),
        kb("F9", "Mostrar/ocultar logs"),
        kb("Ctrl+C", "Salir"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Tema: ", desc_style),
            Span::styled(theme.name, key_style),
        ]),
    ]);

    let area = centered_rect(48, 26, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(theme.background))
        .block(
            dialog_block(theme, theme.highlight, " Ayuda ")
                .title_bottom(Line::from(" F1 o Esc para cerrar ").centered()),
        );

    f.render_widget(paragraph, area);
}

fn render_confirm_delete(f: &mut Frame, theme: &Theme, dni: &str, name: &str) {
    let content = Text::from(vec![
        Line::raw(""),
        Line::styled(
            CONFIRM_DELETE,
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(format!("{}  {}", dni, name), Style::default().fg(theme.warning)),
        Line::raw(""),
        Line::styled("y/Enter: Sí    n/Esc: No", Style::default().fg(theme.muted)),
    ]);

    let area = centered_rect(60, 9, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(theme.background))
        .block(dialog_block(theme, theme.error, " Eliminar persona "));

    f.render_widget(paragraph, area);
}

fn render_offline(f: &mut Frame, ctx: &RenderContext) {
    let theme = ctx.theme;
    let content = Text::from(vec![
        Line::raw(""),
        Line::styled(
            OFFLINE_TITLE,
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(OFFLINE_BODY, Style::default().fg(theme.foreground)),
        Line::raw(""),
        Line::styled("F5: reintentar    q: salir", Style::default().fg(theme.muted)),
    ]);

    let area = centered_rect(70, 9, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(theme.background))
        .block(dialog_block(theme, theme.error, " Sin conexión "));

    f.render_widget(paragraph, area);
}
