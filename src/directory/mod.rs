// Person directory: list, search, filter, delete, copy
//
// Same shape as the lookup workflow: `Directory::update` is the only
// transition function and it returns effects instead of doing I/O.
//
// Fetching rules:
// - every refresh (mount, registration, manual retry) re-checks `/status`
// - `/personas` is only requested while the backend is known to be online
// - search/filter edits re-fetch immediately with the latest filters
// - status and list responses carry a generation; older ones are ignored

use crate::api::{ApiError, Person, PersonId, PersonQuery, TrabajoFilter};
use crate::commands::{Command, Effect, Generation, Notice};
use crate::field::{FieldEdit, TextField};

pub const DEFAULT_MIN_SEARCH_CHARS: usize = 3;

pub const DELETED: &str = "Persona eliminada con éxito.";
pub const DELETE_FAILED: &str = "Error al eliminar la persona.";
pub const FETCH_FAILED: &str = "Error al obtener personas.";

/// Reachability of the backend as last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// First check not answered yet
    Checking,
    Online,
    Offline,
}

#[derive(Debug, Clone)]
pub enum DirectoryMsg {
    /// Mount, registration succeeded, or manual retry
    Refresh,
    StatusChecked {
        generation: Generation,
        result: Result<(), ApiError>,
    },
    EditSearch(FieldEdit),
    NextFilter,
    PrevFilter,
    PersonsFetched {
        generation: Generation,
        result: Result<Vec<Person>, ApiError>,
    },
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    /// Ask for confirmation to delete the selected row
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    DeleteCompleted {
        id: PersonId,
        result: Result<(), ApiError>,
    },
    CopySelected,
}

#[derive(Debug)]
pub struct Directory {
    pub search: TextField,
    filter: TrabajoFilter,
    status: BackendStatus,
    persons: Vec<Person>,
    loading: bool,
    selected: Option<usize>,
    pending_delete: Option<Person>,
    status_generation: Generation,
    fetch_generation: Generation,
    min_search_chars: usize,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SEARCH_CHARS)
    }
}

impl Directory {
    pub fn new(min_search_chars: usize) -> Self {
        Self {
            search: TextField::new(),
            filter: TrabajoFilter::default(),
            status: BackendStatus::Checking,
            persons: Vec::new(),
            loading: true,
            selected: None,
            pending_delete: None,
            status_generation: 0,
            fetch_generation: 0,
            min_search_chars,
        }
    }

    pub fn status(&self) -> BackendStatus {
        self.status
    }

    pub fn is_offline(&self) -> bool {
        self.status == BackendStatus::Offline
    }

    pub fn filter(&self) -> TrabajoFilter {
        self.filter
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_person(&self) -> Option<&Person> {
        self.selected.and_then(|idx| self.persons.get(idx))
    }

    /// Person awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<&Person> {
        self.pending_delete.as_ref()
    }

    pub fn min_search_chars(&self) -> usize {
        self.min_search_chars
    }

    /// Query for the current filter state
    pub fn query(&self) -> PersonQuery {
        PersonQuery::from_filters(self.search.value(), self.filter, self.min_search_chars)
    }

    /// Re-check reachability; a list fetch follows if the backend is up
    pub fn refresh(&mut self) -> Vec<Effect> {
        self.update(DirectoryMsg::Refresh)
    }

    /// The one transition function
    pub fn update(&mut self, msg: DirectoryMsg) -> Vec<Effect> {
        match msg {
            DirectoryMsg::Refresh => {
                self.status_generation += 1;
                tracing::debug!("Checking backend status (gen {})", self.status_generation);
                vec![Effect::Run(Command::CheckStatus {
                    generation: self.status_generation,
                })]
            }
            DirectoryMsg::StatusChecked { generation, result } => {
                self.status_checked(generation, result)
            }
            DirectoryMsg::EditSearch(edit) => {
                if self.search.apply(edit) {
                    self.fetch_if_online()
                } else {
                    Vec::new()
                }
            }
            DirectoryMsg::NextFilter => {
                self.filter = self.filter.next();
                self.fetch_if_online()
            }
            DirectoryMsg::PrevFilter => {
                self.filter = self.filter.prev();
                self.fetch_if_online()
            }
            DirectoryMsg::PersonsFetched { generation, result } => {
                self.persons_fetched(generation, result)
            }
            DirectoryMsg::SelectNext => {
                self.selected = match self.selected {
                    Some(idx) => Some(idx + 1),
                    None => Some(0),
                };
                self.clamp_selection();
                Vec::new()
            }
            DirectoryMsg::SelectPrev => {
                self.selected = match self.selected {
                    Some(idx) => Some(idx.saturating_sub(1)),
                    None => Some(0),
                };
                self.clamp_selection();
                Vec::new()
            }
            DirectoryMsg::SelectFirst => {
                self.selected = Some(0);
                self.clamp_selection();
                Vec::new()
            }
            DirectoryMsg::SelectLast => {
                self.selected = self.persons.len().checked_sub(1);
                Vec::new()
            }
            DirectoryMsg::RequestDelete => {
                self.pending_delete = self.selected_person().cloned();
                Vec::new()
            }
            DirectoryMsg::ConfirmDelete => match self.pending_delete.take() {
                Some(person) => {
                    tracing::debug!("Deleting person {} (DNI {})", person.id, person.dni);
                    vec![Effect::Run(Command::DeletePerson { id: person.id })]
                }
                None => Vec::new(),
            },
            DirectoryMsg::CancelDelete => {
                self.pending_delete = None;
                Vec::new()
            }
            DirectoryMsg::DeleteCompleted { id, result } => match result {
                Ok(()) => {
                    self.persons.retain(|p| p.id != id);
                    self.clamp_selection();
                    vec![Effect::Notify(Notice::success(DELETED))]
                }
                Err(_) => vec![Effect::Notify(Notice::error(DELETE_FAILED))],
            },
            DirectoryMsg::CopySelected => match self.selected_person() {
                Some(person) => vec![Effect::Run(Command::CopyToClipboard {
                    text: person.clipboard_text(),
                })],
                None => Vec::new(),
            },
        }
    }

    fn status_checked(&mut self, generation: Generation, result: Result<(), ApiError>) -> Vec<Effect> {
        if generation != self.status_generation {
            tracing::debug!("Discarding stale status check (gen {})", generation);
            return Vec::new();
        }

        match result {
            Ok(()) => {
                if self.status != BackendStatus::Online {
                    tracing::info!("Backend online");
                }
                self.status = BackendStatus::Online;
                self.fetch()
            }
            Err(_) => {
                self.status = BackendStatus::Offline;
                self.loading = false;
                Vec::new()
            }
        }
    }

    fn fetch_if_online(&mut self) -> Vec<Effect> {
        if self.status == BackendStatus::Online {
            self.fetch()
        } else {
            Vec::new()
        }
    }

    fn fetch(&mut self) -> Vec<Effect> {
        self.fetch_generation += 1;
        self.loading = true;
        vec![Effect::Run(Command::FetchPersons {
            generation: self.fetch_generation,
            query: self.query(),
        })]
    }

    fn persons_fetched(
        &mut self,
        generation: Generation,
        result: Result<Vec<Person>, ApiError>,
    ) -> Vec<Effect> {
        if generation != self.fetch_generation {
            tracing::debug!("Discarding stale person list (gen {})", generation);
            return Vec::new();
        }

        self.loading = false;
        match result {
            Ok(persons) => {
                self.persons = persons;
                self.clamp_selection();
                Vec::new()
            }
            Err(_) => vec![Effect::Notify(Notice::error(FETCH_FAILED))],
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = match (self.selected, self.persons.len()) {
            (_, 0) => None,
            (Some(idx), len) => Some(idx.min(len - 1)),
            (None, _) => None,
        };
    }
}
