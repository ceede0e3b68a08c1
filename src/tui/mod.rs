// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, worker outcomes)
// - Translating keys into workflow messages

pub mod app;
pub mod clipboard;
pub mod components;
pub mod focus;
pub mod input;
pub mod modal;
pub mod theme;
pub mod traits;
pub mod views;

use crate::api::ApiClient;
use crate::commands::{Command, Outcome};
use crate::config::Config;
use crate::directory::DirectoryMsg;
use crate::field::FieldEdit;
use crate::logging::LogBuffer;
use crate::lookup::{FormField, LookupMsg};
use crate::worker::{Worker, OUTCOME_BUFFER};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use focus::Focus;
use modal::ModalAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, starts the worker, runs the event loop, and
/// restores the terminal when done.
pub async fn run_tui(api: ApiClient, log_buffer: LogBuffer, config: Config) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let api_url = api.base_url().to_string();
    let (outcome_tx, mut outcome_rx) = mpsc::channel(OUTCOME_BUFFER);
    let worker = Worker::new(api, outcome_tx);

    let mut app = App::new(&config, log_buffer, api_url);
    app.mount();

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &worker, &mut outcome_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with `tokio::select!`:
/// 1. Keyboard input
/// 2. Timer ticks (spinners, toast expiry)
/// 3. Worker outcomes
///
/// Commands queued by any of them are handed to the worker before the next
/// frame.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &Worker,
    outcome_rx: &mut mpsc::Receiver<Outcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        worker.submit_all(app.take_commands());

        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            // Completed commands
            Some(outcome) = outcome_rx.recv() => {
                app.on_outcome(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Focused element
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    match key_event.kind {
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
            return;
        }
        KeyEventKind::Press => {}
        _ => return,
    }

    if !app.handle_key_press(key_event.code) {
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key_event) {
        return;
    }

    // Layer 2: Global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 3: Whatever has focus
    handle_focused_keys(app, key_event);
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(modal) = &app.modal else {
        return false;
    };

    if is_ctrl_c(key_event) {
        app.should_quit = true;
        return true;
    }

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Confirm => app.directory(DirectoryMsg::ConfirmDelete),
        ModalAction::Cancel => app.directory(DirectoryMsg::CancelDelete),
        ModalAction::Retry => {
            tracing::info!("Retrying backend status check");
            app.directory(DirectoryMsg::Refresh);
        }
        ModalAction::Quit => app.should_quit = true,
    }

    true // Modal absorbed the input
}

fn is_ctrl_c(key_event: &KeyEvent) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Handle global keys - returns true if handled
/// Global keys work the same regardless of focus
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    if is_ctrl_c(key_event) {
        app.should_quit = true;
        return true;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::F(1) => app.modal = Some(modal::Modal::help()),
        KeyCode::F(2) => app.next_theme(),
        KeyCode::F(5) => app.directory(DirectoryMsg::Refresh),
        KeyCode::F(9) => app.toggle_logs(),
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Char('y') | KeyCode::Char('Y') if ctrl => app.lookup(LookupMsg::CopyFound),
        _ => return false,
    }
    true
}

/// Editing keys shared by every text input
fn field_edit(key_event: &KeyEvent) -> Option<FieldEdit> {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);
    match key_event.code {
        KeyCode::Char('u') if ctrl => Some(FieldEdit::Clear),
        KeyCode::Char(c) if !ctrl && !alt => Some(FieldEdit::Insert(c)),
        KeyCode::Backspace => Some(FieldEdit::Backspace),
        KeyCode::Delete => Some(FieldEdit::Delete),
        KeyCode::Left => Some(FieldEdit::Left),
        KeyCode::Right => Some(FieldEdit::Right),
        KeyCode::Home => Some(FieldEdit::Home),
        KeyCode::End => Some(FieldEdit::End),
        _ => None,
    }
}

fn handle_focused_keys(app: &mut App, key_event: KeyEvent) {
    let key = key_event.code;

    match app.focus {
        Focus::Dni => match key {
            KeyCode::Enter => app.lookup(LookupMsg::Submit),
            KeyCode::Down => app.focus_next(),
            _ => {
                if let Some(edit) = field_edit(&key_event) {
                    app.lookup(LookupMsg::EditDni(edit));
                }
            }
        },
        Focus::Form(field) => match key {
            KeyCode::Enter => app.lookup(LookupMsg::SubmitRegistration),
            KeyCode::Esc => app.lookup(LookupMsg::CancelRegistration),
            KeyCode::Up => app.focus_prev(),
            KeyCode::Down => app.focus_next(),
            KeyCode::Left if field == FormField::Trabajo => app.lookup(LookupMsg::PrevTrabajo),
            KeyCode::Right if field == FormField::Trabajo => app.lookup(LookupMsg::NextTrabajo),
            _ if field == FormField::Trabajo => {}
            _ => {
                if let Some(edit) = field_edit(&key_event) {
                    app.lookup(LookupMsg::EditForm(field, edit));
                }
            }
        },
        Focus::Search => match key {
            KeyCode::Down => app.focus_next(),
            _ => {
                if let Some(edit) = field_edit(&key_event) {
                    app.directory(DirectoryMsg::EditSearch(edit));
                }
            }
        },
        Focus::Filter => match key {
            KeyCode::Left => app.directory(DirectoryMsg::PrevFilter),
            KeyCode::Right => app.directory(DirectoryMsg::NextFilter),
            KeyCode::Down => app.focus_next(),
            KeyCode::Up => app.focus_prev(),
            _ => {}
        },
        Focus::Table => match key {
            KeyCode::Up | KeyCode::Char('k') => app.directory(DirectoryMsg::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => app.directory(DirectoryMsg::SelectNext),
            KeyCode::Home => app.directory(DirectoryMsg::SelectFirst),
            KeyCode::End => app.directory(DirectoryMsg::SelectLast),
            KeyCode::Char('y') => app.directory(DirectoryMsg::CopySelected),
            KeyCode::Char('d') | KeyCode::Delete => app.directory(DirectoryMsg::RequestDelete),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        },
        Focus::Logs => {
            if !app.logs_panel.handle_key(key_event) && key == KeyCode::Char('y') {
                if let Some(text) = app.logs_panel.copy_text() {
                    app.run(Command::CopyToClipboard { text });
                }
            }
        }
    }
}
