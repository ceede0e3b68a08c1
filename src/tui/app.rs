// TUI application state
//
// Owns the `Desk` plus everything that only exists on screen: focus, modal,
// toast, logs visibility, theme. Workflow changes go through `lookup()` /
// `directory()` / `on_outcome()`, which queue the resulting commands for the
// worker and turn notices into toasts.

use super::components::{DirectoryPanel, LogsPanel, LookupPanel, Toast};
use super::focus::Focus;
use super::input::InputHandler;
use super::modal::Modal;
use super::theme::{Theme, ThemeKind};
use crate::commands::{Command, Notice, Outcome};
use crate::config::Config;
use crate::desk::{Desk, Dispatch};
use crate::directory::DirectoryMsg;
use crate::logging::LogBuffer;
use crate::lookup::LookupMsg;
use crossterm::event::KeyCode;

/// Main application state for the TUI
pub struct App {
    pub desk: Desk,

    pub focus: Focus,

    /// Overlay absorbing all input while open
    pub modal: Option<Modal>,

    pub toast: Option<Toast>,

    /// Whether the logs panel is visible (F9)
    pub show_logs: bool,

    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Log buffer for system logs display
    pub log_buffer: LogBuffer,

    pub lookup_panel: LookupPanel,
    pub directory_panel: DirectoryPanel,
    pub logs_panel: LogsPanel,

    /// Backend base URL shown in the title bar
    pub api_url: String,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Animation frame counter (for spinners)
    pub animation_frame: usize,

    /// Input handler for action-key debouncing
    input_handler: InputHandler,

    /// Commands waiting to be handed to the worker
    pending: Vec<Command>,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer, api_url: String) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme);
        Self {
            desk: Desk::new(config.search_min_chars),
            focus: Focus::default(),
            modal: None,
            toast: None,
            show_logs: false,
            theme_kind,
            theme: theme_kind.theme(),
            logs_panel: LogsPanel::new(log_buffer.clone()),
            log_buffer,
            lookup_panel: LookupPanel::new(),
            directory_panel: DirectoryPanel::new(),
            api_url,
            should_quit: false,
            animation_frame: 0,
            input_handler: InputHandler::default(),
            pending: Vec::new(),
        }
    }

    /// Initial status check and list load
    pub fn mount(&mut self) {
        let dispatch = self.desk.mount();
        self.apply(dispatch);
    }

    pub fn lookup(&mut self, msg: LookupMsg) {
        let dispatch = self.desk.lookup(msg);
        self.apply(dispatch);
    }

    pub fn directory(&mut self, msg: DirectoryMsg) {
        let dispatch = self.desk.directory(msg);
        self.apply(dispatch);
    }

    pub fn on_outcome(&mut self, outcome: Outcome) {
        let dispatch = self.desk.outcome(outcome);
        self.apply(dispatch);
    }

    /// Queue a command that does not go through a workflow
    pub fn run(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Drain commands for the worker
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    fn apply(&mut self, dispatch: Dispatch) {
        self.pending.extend(dispatch.commands);
        // Only the latest notice stays on screen
        if let Some(notice) = dispatch.notices.into_iter().last() {
            self.show_toast(notice);
        }
        self.sync_modal();
        self.focus = self.focus.normalize(self.form_open(), self.show_logs);
    }

    /// Open or close the modals that mirror workflow state
    fn sync_modal(&mut self) {
        let directory = &self.desk.directory;

        if directory.is_offline() {
            if self.modal != Some(Modal::BackendOffline) {
                tracing::warn!("Backend unreachable, showing offline notice");
                self.modal = Some(Modal::BackendOffline);
            }
            return;
        }

        let confirm_open = matches!(self.modal, Some(Modal::ConfirmDelete { .. }));
        match directory.pending_delete() {
            Some(person) if !confirm_open => {
                self.modal = Some(Modal::confirm_delete(
                    person.dni.clone(),
                    format!("{} {}", person.nombre, person.apellido),
                ));
            }
            Some(_) => {}
            None => {
                if confirm_open || self.modal == Some(Modal::BackendOffline) {
                    self.modal = None;
                }
            }
        }
    }

    /// Whether the registration form is on screen
    pub fn form_open(&self) -> bool {
        self.desk.lookup.form().is_some()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.form_open(), self.show_logs);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev(self.form_open(), self.show_logs);
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        self.focus = self.focus.normalize(self.form_open(), self.show_logs);
    }

    /// Cycle to the next theme
    pub fn next_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        tracing::debug!("Theme switched to {}", self.theme_kind.name());
    }

    pub fn show_toast(&mut self, notice: Notice) {
        self.toast = Some(Toast::new(notice));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Handle a key press - returns true if the action should be triggered
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Person, PersonId, Trabajo};
    use crate::commands::NoticeKind;

    fn app() -> App {
        App::new(
            &Config::default(),
            LogBuffer::new(),
            "http://127.0.0.1:5000/api".to_string(),
        )
    }

    fn status_generation(app: &mut App) -> u64 {
        match app.take_commands().as_slice() {
            [Command::CheckStatus { generation }] => *generation,
            other => panic!("expected a status check, got {:?}", other),
        }
    }

    fn online_with(app: &mut App, persons: Vec<Person>) {
        app.mount();
        let generation = status_generation(app);
        app.on_outcome(Outcome::StatusChecked {
            generation,
            result: Ok(()),
        });
        let generation = match app.take_commands().as_slice() {
            [Command::FetchPersons { generation, .. }] => *generation,
            other => panic!("expected a list fetch, got {:?}", other),
        };
        app.on_outcome(Outcome::PersonsFetched {
            generation,
            result: Ok(persons),
        });
    }

    #[test]
    fn test_offline_status_opens_notice_until_back_online() {
        let mut app = app();
        app.mount();
        let generation = status_generation(&mut app);
        app.on_outcome(Outcome::StatusChecked {
            generation,
            result: Err(ApiError::Network("connection refused".to_string())),
        });
        assert_eq!(app.modal, Some(Modal::BackendOffline));
        assert!(app.take_commands().is_empty());

        app.directory(DirectoryMsg::Refresh);
        let generation = status_generation(&mut app);
        app.on_outcome(Outcome::StatusChecked {
            generation,
            result: Ok(()),
        });
        assert_eq!(app.modal, None);
        assert!(matches!(
            app.take_commands().as_slice(),
            [Command::FetchPersons { .. }]
        ));
    }

    #[test]
    fn test_request_delete_opens_confirmation() {
        let mut app = app();
        online_with(
            &mut app,
            vec![Person {
                id: PersonId::new("4"),
                dni: "30111222".to_string(),
                nombre: "Lucía".to_string(),
                apellido: "Fernández".to_string(),
                trabajo: Trabajo::Salud,
            }],
        );

        app.directory(DirectoryMsg::SelectFirst);
        app.directory(DirectoryMsg::RequestDelete);
        assert_eq!(
            app.modal,
            Some(Modal::confirm_delete("30111222", "Lucía Fernández"))
        );

        app.directory(DirectoryMsg::CancelDelete);
        assert_eq!(app.modal, None);
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn test_notices_become_toasts() {
        let mut app = app();
        app.on_outcome(Outcome::Copied {
            text: "abc 20123456".to_string(),
            result: Ok(()),
        });

        let toast = app.toast.as_ref().expect("toast shown");
        assert_eq!(toast.kind, NoticeKind::Success);
        assert_eq!(toast.message, "✓ Copiado: abc 20123456");
    }

    #[test]
    fn test_theme_follows_config_and_cycles() {
        let config = Config {
            theme: "light".to_string(),
            ..Config::default()
        };
        let mut app = App::new(&config, LogBuffer::new(), String::new());
        assert_eq!(app.theme.name, "light");
        app.next_theme();
        assert_eq!(app.theme.name, "dark");
    }
}
