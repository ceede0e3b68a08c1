// Root container - owns both workflows and routes between them
//
// UI code talks to the workflows only through `Desk`: it forwards a message,
// gets back a `Dispatch` (commands for the worker, notices for toasts) and
// hands each completed `Outcome` back the same way.

use crate::commands::{Command, Effect, Notice, Outcome};
use crate::directory::{Directory, DirectoryMsg};
use crate::lookup::{LookupMsg, LookupWorkflow};

/// Work produced by one transition
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub commands: Vec<Command>,
    pub notices: Vec<Notice>,
}

#[derive(Debug)]
pub struct Desk {
    pub lookup: LookupWorkflow,
    pub directory: Directory,
}

impl Desk {
    pub fn new(min_search_chars: usize) -> Self {
        Self {
            lookup: LookupWorkflow::new(),
            directory: Directory::new(min_search_chars),
        }
    }

    /// First status check and list load
    pub fn mount(&mut self) -> Dispatch {
        let effects = self.directory.refresh();
        self.route(effects)
    }

    pub fn lookup(&mut self, msg: LookupMsg) -> Dispatch {
        let effects = self.lookup.update(msg);
        self.route(effects)
    }

    pub fn directory(&mut self, msg: DirectoryMsg) -> Dispatch {
        let effects = self.directory.update(msg);
        self.route(effects)
    }

    /// Deliver a worker outcome to the workflow that issued it
    pub fn outcome(&mut self, outcome: Outcome) -> Dispatch {
        match outcome {
            Outcome::StatusChecked { generation, result } => {
                self.directory(DirectoryMsg::StatusChecked { generation, result })
            }
            Outcome::PersonsFetched { generation, result } => {
                self.directory(DirectoryMsg::PersonsFetched { generation, result })
            }
            Outcome::DeleteCompleted { id, result } => {
                self.directory(DirectoryMsg::DeleteCompleted { id, result })
            }
            Outcome::LookupCompleted { attempt, result } => {
                self.lookup(LookupMsg::LookupCompleted { attempt, result })
            }
            Outcome::CreateCompleted { attempt, result } => {
                self.lookup(LookupMsg::CreateCompleted { attempt, result })
            }
            Outcome::Copied { text, result } => {
                let notice = match result {
                    Ok(()) => Notice::success(format!("✓ Copiado: {}", text)),
                    Err(_) => Notice::error("✗ No se pudo copiar"),
                };
                Dispatch {
                    commands: Vec::new(),
                    notices: vec![notice],
                }
            }
        }
    }

    fn route(&mut self, effects: Vec<Effect>) -> Dispatch {
        let mut dispatch = Dispatch::default();
        for effect in effects {
            match effect {
                Effect::Run(command) => dispatch.commands.push(command),
                Effect::Notify(notice) => dispatch.notices.push(notice),
                Effect::Registered => {
                    tracing::debug!("Registration done, refreshing directory");
                    let nested = self.directory.refresh();
                    let more = self.route(nested);
                    dispatch.commands.extend(more.commands);
                    dispatch.notices.extend(more.notices);
                }
            }
        }
        dispatch
    }
}
