// Focus ring for the main screen
//
// Order: DNI input, then the registration form fields while the form is
// editable, then search, filter, table, and the logs panel when visible.

use crate::lookup::FormField;
use crate::tui::traits::ComponentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Dni,
    Form(FormField),
    Search,
    Filter,
    Table,
    Logs,
}

impl Focus {
    pub fn component(self) -> ComponentId {
        match self {
            Focus::Dni | Focus::Form(_) => ComponentId::Lookup,
            Focus::Search | Focus::Filter | Focus::Table => ComponentId::Directory,
            Focus::Logs => ComponentId::Logs,
        }
    }

    fn ring(form_open: bool, logs_visible: bool) -> Vec<Focus> {
        let mut ring = vec![Focus::Dni];
        if form_open {
            ring.extend([
                Focus::Form(FormField::Nombre),
                Focus::Form(FormField::Apellido),
                Focus::Form(FormField::Trabajo),
            ]);
        }
        ring.extend([Focus::Search, Focus::Filter, Focus::Table]);
        if logs_visible {
            ring.push(Focus::Logs);
        }
        ring
    }

    /// Tab
    pub fn next(self, form_open: bool, logs_visible: bool) -> Self {
        let ring = Self::ring(form_open, logs_visible);
        match ring.iter().position(|&f| f == self) {
            Some(idx) => ring[(idx + 1) % ring.len()],
            None => Focus::Dni,
        }
    }

    /// Shift+Tab
    pub fn prev(self, form_open: bool, logs_visible: bool) -> Self {
        let ring = Self::ring(form_open, logs_visible);
        match ring.iter().position(|&f| f == self) {
            Some(idx) => ring[(idx + ring.len() - 1) % ring.len()],
            None => Focus::Dni,
        }
    }

    /// Move off elements that are no longer in the ring
    pub fn normalize(self, form_open: bool, logs_visible: bool) -> Self {
        match self {
            Focus::Form(_) if !form_open => Focus::Dni,
            Focus::Logs if !logs_visible => Focus::Table,
            other => other,
        }
    }
}
