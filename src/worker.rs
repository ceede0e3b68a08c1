// Request worker - executes Commands off the UI loop
//
// Each command runs in its own tokio task holding a clone of the API client.
// Results come back over a bounded mpsc channel that the TUI loop selects on.
// Tasks never touch UI state.

use crate::api::ApiClient;
use crate::commands::{Command, Outcome};
use crate::tui::clipboard::{self, SharedClipboard, SystemClipboard};
use tokio::sync::mpsc;

/// Channel capacity for outcomes; senders wait when the UI falls behind
pub const OUTCOME_BUFFER: usize = 256;

#[derive(Clone)]
pub struct Worker {
    api: ApiClient,
    clipboard: SharedClipboard,
    outcomes: mpsc::Sender<Outcome>,
}

impl Worker {
    pub fn new(api: ApiClient, outcomes: mpsc::Sender<Outcome>) -> Self {
        Self {
            api,
            clipboard: SystemClipboard::shared(),
            outcomes,
        }
    }

    /// Spawn every command; returns immediately
    pub fn submit_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.submit(command);
        }
    }

    /// Spawn one command; its outcome arrives later on the channel
    pub fn submit(&self, command: Command) {
        tracing::debug!("Dispatching {:?}", command);
        let api = self.api.clone();
        let clipboard = self.clipboard.clone();
        let tx = self.outcomes.clone();

        tokio::spawn(async move {
            let outcome = execute(&api, &clipboard, command).await;
            if tx.send(outcome).await.is_err() {
                // UI loop is gone (shutting down)
                tracing::debug!("Outcome dropped: receiver closed");
            }
        });
    }
}

/// Run a single command to completion
pub async fn execute(api: &ApiClient, clipboard: &SharedClipboard, command: Command) -> Outcome {
    match command {
        Command::CheckStatus { generation } => {
            let result = api.check_status().await;
            if let Err(e) = &result {
                tracing::warn!("Backend offline or unreachable: {}", e);
            }
            Outcome::StatusChecked { generation, result }
        }
        Command::FetchPersons { generation, query } => {
            let result = api.list_personas(&query).await;
            match &result {
                Ok(persons) => tracing::debug!("Fetched {} persons", persons.len()),
                Err(e) => tracing::warn!("Error fetching persons: {}", e),
            }
            Outcome::PersonsFetched { generation, result }
        }
        Command::LookupDni { attempt, dni } => {
            let result = api.find_by_dni(&dni).await;
            if let Err(e) = &result {
                tracing::warn!("DNI lookup for {} failed: {}", dni, e);
            }
            Outcome::LookupCompleted { attempt, result }
        }
        Command::CreatePerson { attempt, person } => {
            let result = api.create_persona(&person).await;
            match &result {
                Ok(_) => tracing::info!("Registered DNI {}", person.dni),
                Err(e) => tracing::warn!("Registration of DNI {} failed: {}", person.dni, e),
            }
            Outcome::CreateCompleted { attempt, result }
        }
        Command::DeletePerson { id } => {
            let result = api.delete_persona(&id).await;
            match &result {
                Ok(()) => tracing::info!("Deleted person {}", id),
                Err(e) => tracing::error!("Error deleting person {}: {}", id, e),
            }
            Outcome::DeleteCompleted { id, result }
        }
        Command::CopyToClipboard { text } => {
            // arboard is blocking; keep it off the runtime threads
            let to_copy = text.clone();
            let handle = clipboard.clone();
            let result = tokio::task::spawn_blocking(move || clipboard::copy_shared(&handle, &to_copy))
                .await
                .map_err(|e| e.to_string())
                .and_then(|r| r.map_err(|e| format!("{:#}", e)));
            if let Err(e) = &result {
                tracing::warn!("Clipboard write failed: {}", e);
            }
            Outcome::Copied { text, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Dni, NewPerson, PersonQuery, Trabajo, TrabajoFilter};
    use crate::demo::DemoBackend;
    use std::time::Duration;

    async fn recv(rx: &mut mpsc::Receiver<Outcome>) -> Outcome {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("outcome within timeout")
            .expect("channel open")
    }

    #[tokio::test]
    async fn test_execute_echoes_attempt_and_generation() {
        let backend = DemoBackend::seeded();
        let server = backend.spawn("127.0.0.1:0").await.unwrap();
        let api = ApiClient::new(&server.base_url()).unwrap();
        let clipboard = SystemClipboard::shared();

        let outcome = execute(
            &api,
            &clipboard,
            Command::LookupDni {
                attempt: 42,
                dni: Dni::parse("20123456").unwrap(),
            },
        )
        .await;
        match outcome {
            Outcome::LookupCompleted {
                attempt,
                result: Ok(Some(person)),
            } => {
                assert_eq!(attempt, 42);
                assert_eq!(person.nombre, "María");
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        let outcome = execute(
            &api,
            &clipboard,
            Command::FetchPersons {
                generation: 7,
                query: PersonQuery::from_filters("", TrabajoFilter::Only(Trabajo::Caja), 3),
            },
        )
        .await;
        match outcome {
            Outcome::PersonsFetched {
                generation,
                result: Ok(persons),
            } => {
                assert_eq!(generation, 7);
                assert_eq!(persons.len(), 2);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_reports_over_channel() {
        let backend = DemoBackend::new();
        let server = backend.spawn("127.0.0.1:0").await.unwrap();
        let api = ApiClient::new(&server.base_url()).unwrap();
        let (tx, mut rx) = mpsc::channel(OUTCOME_BUFFER);
        let worker = Worker::new(api, tx);

        worker.submit(Command::CreatePerson {
            attempt: 1,
            person: NewPerson {
                dni: "12345678".to_string(),
                nombre: "Ana".to_string(),
                apellido: "Diaz".to_string(),
                trabajo: Trabajo::Salud,
            },
        });

        match recv(&mut rx).await {
            Outcome::CreateCompleted {
                attempt: 1,
                result: Ok(_),
            } => {}
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(backend.count_requests("POST /personas"), 1);
    }
}
