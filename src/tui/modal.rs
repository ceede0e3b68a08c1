// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    Close,
    /// Delete confirmed
    Confirm,
    /// Delete cancelled
    Cancel,
    /// Re-check backend status
    Retry,
    Quit,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Asks before deleting the person shown
    ConfirmDelete { dni: String, name: String },
    /// `/status` failed; stays up until a retry succeeds
    BackendOffline,
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn confirm_delete(dni: impl Into<String>, name: impl Into<String>) -> Self {
        Modal::ConfirmDelete {
            dni: dni.into(),
            name: name.into(),
        }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                    ModalAction::Close
                }
                _ => ModalAction::None,
            },
            Modal::ConfirmDelete { .. } => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('s') | KeyCode::Enter => {
                    ModalAction::Confirm
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ModalAction::Cancel,
                _ => ModalAction::None,
            },
            Modal::BackendOffline => match key {
                KeyCode::F(5) | KeyCode::Char('r') | KeyCode::Enter => ModalAction::Retry,
                KeyCode::Char('q') | KeyCode::Esc => ModalAction::Quit,
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_delete_keys() {
        let modal = Modal::confirm_delete("20123456", "María González");
        assert_eq!(modal.handle_input(KeyCode::Enter), ModalAction::Confirm);
        assert_eq!(modal.handle_input(KeyCode::Char('y')), ModalAction::Confirm);
        assert_eq!(modal.handle_input(KeyCode::Esc), ModalAction::Cancel);
        assert_eq!(modal.handle_input(KeyCode::Char('n')), ModalAction::Cancel);
        assert_eq!(modal.handle_input(KeyCode::Char('d')), ModalAction::None);
    }

    #[test]
    fn test_offline_notice_only_retries_or_quits() {
        let modal = Modal::BackendOffline;
        assert_eq!(modal.handle_input(KeyCode::F(5)), ModalAction::Retry);
        assert_eq!(modal.handle_input(KeyCode::Char('q')), ModalAction::Quit);
        assert_eq!(modal.handle_input(KeyCode::Tab), ModalAction::None);
    }
}
