//! Directory panel component
//!
//! Search box, trabajo filter, and the person table. Selection lives in
//! `Directory`; a `TableState` is rebuilt from it every frame.

use super::text_input::TextInput;
use crate::directory::Directory;
use crate::tui::focus::Focus;
use crate::tui::traits::{Component, ComponentId, RenderContext};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

pub const SEARCH_PLACEHOLDER: &str = "Buscar (mín. 3 letras)...";
pub const EMPTY_RESULT: &str = "No se encontraron resultados.";
pub const LOADING: &str = "Cargando datos...";

pub struct DirectoryPanel;

impl DirectoryPanel {
    pub fn new() -> Self {
        Self
    }

    fn render_filter(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.focus == Focus::Filter;
        let border = if focused {
            theme.highlight
        } else {
            theme.border
        };

        let filter = Paragraph::new(format!("◂ {} ▸", ctx.desk.directory.filter().label()))
            .style(Style::default().fg(theme.foreground))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(border))
                    .title(" Trabajo "),
            );
        f.render_widget(filter, area);
    }

    fn render_table(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let directory = &ctx.desk.directory;
        let focused = ctx.focus == Focus::Table;

        let header = Row::new(["DNI", "Nombre", "Apellido", "Trabajo"])
            .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));
        let widths = [
            Constraint::Length(12),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Length(8),
        ];

        let border = if focused {
            theme.highlight
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .title(table_title(directory));

        let message = if directory.is_loading() {
            Some((
                format!("{} {}", ctx.spinner_char(), LOADING),
                Style::default().fg(theme.warning),
            ))
        } else if directory.persons().is_empty() {
            Some((EMPTY_RESULT.to_string(), Style::default().fg(theme.muted)))
        } else {
            None
        };

        // Loading and empty states keep the headers with one message line under them
        if let Some((text, style)) = message {
            let inner = block.inner(area);
            let table = Table::new(Vec::<Row>::new(), widths).header(header).block(block);
            f.render_widget(table, area);

            let message_area = Rect {
                y: inner.y.saturating_add(1),
                height: inner.height.saturating_sub(1),
                ..inner
            };
            f.render_widget(Paragraph::new(Line::styled(text, style)), message_area);
            return;
        }

        let rows: Vec<Row> = directory
            .persons()
            .iter()
            .map(|person| {
                Row::new([
                    person.dni.clone(),
                    person.nombre.clone(),
                    person.apellido.clone(),
                    person.trabajo.to_string(),
                ])
                .style(Style::default().fg(theme.foreground))
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        let mut state = TableState::default().with_selected(directory.selected());
        f.render_stateful_widget(table, area, &mut state);
    }
}

impl Default for DirectoryPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn table_title(directory: &Directory) -> Line<'static> {
    if directory.is_loading() {
        Line::from(" Personas ")
    } else {
        Line::from(vec![
            Span::raw(" Personas "),
            Span::raw(format!("({}) ", directory.persons().len())),
        ])
    }
}

impl Component for DirectoryPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Directory
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let directory = &ctx.desk.directory;
        let border = if ctx.is_focused(self.id()) {
            theme.highlight
        } else {
            theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .title(" Listado de Personas ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [controls_area, hint_area, table_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(inner);
        let [search_area, filter_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(24)]).areas(controls_area);

        TextInput::new("Buscar", &directory.search)
            .placeholder(SEARCH_PLACEHOLDER)
            .focused(ctx.focus == Focus::Search)
            .render(f, search_area, theme);
        self.render_filter(f, filter_area, ctx);

        // Below the threshold the term is not sent
        if !directory.search.is_empty() && directory.query().q.is_empty() {
            let hint = Line::styled(
                format!(" mínimo {} letras para filtrar", directory.min_search_chars()),
                Style::default().fg(theme.muted),
            );
            f.render_widget(Paragraph::new(hint), hint_area);
        }

        self.render_table(f, table_area, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Person, PersonId, Trabajo};
    use crate::commands::{Command, Outcome};
    use crate::desk::Desk;
    use crate::directory::DirectoryMsg;
    use crate::field::FieldEdit;
    use crate::tui::components::test_support::render_lines;
    use crate::tui::theme::Theme;

    /// Bring the desk online and answer its list fetch
    fn loaded(persons: Vec<Person>) -> Desk {
        let mut desk = Desk::new(3);
        let dispatch = desk.mount();
        let Some(Command::CheckStatus { generation }) = dispatch.commands.first() else {
            panic!("mount must check status");
        };
        let dispatch = desk.outcome(Outcome::StatusChecked {
            generation: *generation,
            result: Ok(()),
        });
        let Some(Command::FetchPersons { generation, .. }) = dispatch.commands.first() else {
            panic!("online status must fetch persons");
        };
        desk.outcome(Outcome::PersonsFetched {
            generation: *generation,
            result: Ok(persons),
        });
        desk
    }

    fn draw(desk: &Desk) -> Vec<String> {
        let theme = Theme::default();
        let ctx = RenderContext {
            theme: &theme,
            desk,
            focus: Focus::Table,
            log_entries: &[],
            animation_frame: 0,
        };
        render_lines(80, 16, |f| DirectoryPanel::new().render(f, f.area(), &ctx))
    }

    #[test]
    fn test_empty_list_renders_no_results_row() {
        let lines = draw(&loaded(Vec::new()));
        assert!(lines.iter().any(|l| l.contains(EMPTY_RESULT)));
        assert!(lines.iter().any(|l| l.contains("Todos los trabajos")));
    }

    #[test]
    fn test_loading_before_first_answer() {
        let desk = Desk::new(3);
        let lines = draw(&desk);
        assert!(lines.iter().any(|l| l.contains(LOADING)));
    }

    fn type_search(desk: &mut Desk, text: &str) {
        for c in text.chars() {
            desk.directory(DirectoryMsg::EditSearch(FieldEdit::Insert(c)));
        }
    }

    #[test]
    fn test_short_term_shows_minimum_hint() {
        let mut desk = loaded(Vec::new());
        type_search(&mut desk, "ab");
        assert!(desk.directory.query().q.is_empty());

        let lines = draw(&desk);
        assert!(lines.iter().any(|l| l.contains("mínimo 3 letras para filtrar")));
    }

    #[test]
    fn test_hint_hidden_when_term_with_trailing_space_is_sent() {
        let mut desk = loaded(Vec::new());
        type_search(&mut desk, "ab ");
        assert_eq!(desk.directory.query().q, "ab ");

        let lines = draw(&desk);
        assert!(!lines.iter().any(|l| l.contains("letras para filtrar")));
    }

    #[test]
    fn test_rows_render_under_headers() {
        let desk = loaded(vec![Person {
            id: PersonId::new("2"),
            dni: "27987654".to_string(),
            nombre: "Juan".to_string(),
            apellido: "Pérez".to_string(),
            trabajo: Trabajo::Caja,
        }]);
        let lines = draw(&desk);

        assert!(lines
            .iter()
            .any(|l| l.contains("DNI") && l.contains("Apellido") && l.contains("Trabajo")));
        let row = lines
            .iter()
            .find(|l| l.contains("27987654"))
            .expect("person row");
        assert!(row.contains("Juan") && row.contains("Pérez") && row.contains("caja"));
        assert!(!lines.iter().any(|l| l.contains(EMPTY_RESULT)));
    }
}
