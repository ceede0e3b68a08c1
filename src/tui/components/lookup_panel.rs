//! Lookup panel component
//!
//! DNI input, the lookup status line, and below it either the found record
//! or the registration form. All state lives in `LookupWorkflow`; the panel
//! only reads it.

use super::text_input::TextInput;
use crate::api::Person;
use crate::lookup::{FormField, LookupWorkflow, Phase, RegistrationForm};
use crate::tui::focus::Focus;
use crate::tui::theme::Theme;
use crate::tui::traits::{Component, ComponentId, RenderContext};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const DNI_PLACEHOLDER: &str = "Ingresar DNI";

pub struct LookupPanel;

impl LookupPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LookupPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LookupPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Lookup
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let lookup = &ctx.desk.lookup;
        let border = if ctx.is_focused(self.id()) {
            theme.highlight
        } else {
            theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .title(" Consulta por DNI ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [input_area, message_area, _, body_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        TextInput::new("DNI", &lookup.dni_input)
            .placeholder(DNI_PLACEHOLDER)
            .focused(ctx.focus == Focus::Dni)
            .render(f, input_area, theme);

        render_message(f, message_area, lookup, ctx);

        if let Some(person) = lookup.found() {
            render_found(f, body_area, person, theme);
        } else if let Some(form) = lookup.form() {
            render_form(f, body_area, form, lookup.form_editable(), ctx);
        }
    }
}

fn render_message(f: &mut Frame, area: Rect, lookup: &LookupWorkflow, ctx: &RenderContext) {
    let Some(message) = lookup.message() else {
        return;
    };
    let theme = ctx.theme;

    let line = match lookup.phase() {
        Phase::Querying { .. } => Line::from(vec![
            Span::styled(
                format!(" {} ", ctx.spinner_char()),
                Style::default().fg(theme.warning),
            ),
            Span::styled(message, Style::default().fg(theme.warning)),
        ]),
        Phase::InvalidInput | Phase::QueryError => {
            Line::styled(format!(" {}", message), Style::default().fg(theme.error))
        }
        Phase::Found(_) => {
            Line::styled(format!(" {}", message), Style::default().fg(theme.success))
        }
        _ => Line::styled(format!(" {}", message), Style::default().fg(theme.foreground)),
    };

    f.render_widget(Paragraph::new(line), area);
}

fn render_found(f: &mut Frame, area: Rect, person: &Person, theme: &Theme) {
    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.foreground);
    let row = |name: &'static str, text: String| {
        Line::from(vec![
            Span::styled(format!(" {:<10}", name), label),
            Span::styled(text, value),
        ])
    };

    let lines = vec![
        row("DNI", person.dni.clone()),
        row("Nombre", person.nombre.clone()),
        row("Apellido", person.apellido.clone()),
        row("Trabajo", person.trabajo.to_string()),
        Line::default(),
        Line::from(vec![
            Span::styled(
                format!(" [ Copiar: {} ]", person.clipboard_text()),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Ctrl+Y", label),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), area);
}

fn render_form(
    f: &mut Frame,
    area: Rect,
    form: &RegistrationForm,
    editable: bool,
    ctx: &RenderContext,
) {
    let theme = ctx.theme;
    let [heading_area, nombre_area, apellido_area, trabajo_area, buttons_area, error_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

    let heading = Line::styled(
        format!(" Registrar Nuevo DNI: {}", form.dni()),
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    );
    f.render_widget(Paragraph::new(heading), heading_area);

    let focused = |field: FormField| editable && ctx.focus == Focus::Form(field);

    TextInput::new("Nombre", &form.nombre)
        .focused(focused(FormField::Nombre))
        .enabled(editable)
        .render(f, nombre_area, theme);
    TextInput::new("Apellido", &form.apellido)
        .focused(focused(FormField::Apellido))
        .enabled(editable)
        .render(f, apellido_area, theme);

    let selector_border = if focused(FormField::Trabajo) {
        theme.highlight
    } else {
        theme.border
    };
    let selector = Paragraph::new(format!("◂ {} ▸", form.trabajo))
        .style(Style::default().fg(theme.foreground))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(selector_border))
                .title(" Trabajo "),
        );
    f.render_widget(selector, trabajo_area);

    let buttons = if editable {
        Line::from(vec![
            Span::styled(
                " [ Guardar Registro ]",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enter", Style::default().fg(theme.muted)),
            Span::styled("   [ Cancelar ]", Style::default().fg(theme.foreground)),
            Span::styled("  Esc", Style::default().fg(theme.muted)),
        ])
    } else {
        Line::styled(
            format!(" {} Guardando...", ctx.spinner_char()),
            Style::default().fg(theme.warning),
        )
    };
    f.render_widget(Paragraph::new(buttons), buttons_area);

    if let Some(error) = &form.error {
        f.render_widget(
            Paragraph::new(Line::styled(
                format!(" {}", error),
                Style::default().fg(theme.error),
            )),
            error_area,
        );
    }
}
