// Commands and outcomes - the boundary between UI state and I/O
//
// State machines (lookup, directory) never perform I/O. They return
// `Effect`s; the root container turns the I/O ones into `Command`s for the
// worker, and the worker answers each command with exactly one `Outcome`.
//
// Every request that can race carries an id (attempt or generation) that is
// echoed back in its outcome, so the issuing state machine can discard
// responses that belong to a superseded request.

use crate::api::{ApiError, Dni, NewPerson, Person, PersonId, PersonQuery};

/// Monotonic id attached to lookup/registration requests
pub type AttemptId = u64;

/// Monotonic id attached to status/list requests
pub type Generation = u64;

/// Outbound I/O request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `GET /status`
    CheckStatus { generation: Generation },
    /// `GET /personas`
    FetchPersons {
        generation: Generation,
        query: PersonQuery,
    },
    /// `GET /personas/dni/<dni>`
    LookupDni { attempt: AttemptId, dni: Dni },
    /// `POST /personas`
    CreatePerson {
        attempt: AttemptId,
        person: NewPerson,
    },
    /// `DELETE /personas/<id>`
    DeletePerson { id: PersonId },
    /// Write text to the system clipboard
    CopyToClipboard { text: String },
}

/// Completion of a `Command`
#[derive(Debug, Clone)]
pub enum Outcome {
    StatusChecked {
        generation: Generation,
        result: Result<(), ApiError>,
    },
    PersonsFetched {
        generation: Generation,
        result: Result<Vec<Person>, ApiError>,
    },
    LookupCompleted {
        attempt: AttemptId,
        result: Result<Option<Person>, ApiError>,
    },
    CreateCompleted {
        attempt: AttemptId,
        result: Result<Option<Person>, ApiError>,
    },
    DeleteCompleted {
        id: PersonId,
        result: Result<(), ApiError>,
    },
    Copied {
        text: String,
        result: Result<(), String>,
    },
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short-lived feedback shown as a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// What a state-machine transition asks its owner to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand to the worker
    Run(Command),
    /// Show feedback to the user
    Notify(Notice),
    /// A person was registered; the directory must refresh
    Registered,
}
