// Demo mode: an in-memory persons backend
//
// Serves the same REST surface as the real backend so the TUI can be tried
// without it. Also the fixture behind the HTTP tests: every request is
// recorded as "METHOD /path?query" (without the /api prefix).
//
// Run with: DNI_DESK_DEMO=1 cargo run --release
//       or: cargo run -- serve-demo --bind 127.0.0.1:5000

use crate::api::{NewPerson, Person, PersonId, Trabajo, TrabajoFilter};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Path prefix the demo routes live under (matches the default api_url)
const API_PREFIX: &str = "/api";

#[derive(Debug, Default)]
struct DemoState {
    persons: Vec<Person>,
    next_id: u64,
    offline: bool,
    requests: Vec<String>,
}

/// Shared handle to the in-memory backend
#[derive(Debug, Clone, Default)]
pub struct DemoBackend {
    state: Arc<Mutex<DemoState>>,
}

impl DemoBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-filled with a handful of people
    pub fn seeded() -> Self {
        let backend = Self::new();
        let seed = [
            ("20123456", "María", "González", Trabajo::Abc),
            ("27987654", "Juan", "Pérez", Trabajo::Caja),
            ("30555111", "Lucía", "Fernández", Trabajo::Salud),
            ("33444222", "Diego", "Romero", Trabajo::Caja),
            ("35111999", "Sofía", "Martínez", Trabajo::Abc),
        ];
        {
            let mut state = backend.lock();
            for (dni, nombre, apellido, trabajo) in seed {
                state.insert(NewPerson {
                    dni: dni.to_string(),
                    nombre: nombre.to_string(),
                    apellido: apellido.to_string(),
                    trabajo,
                });
            }
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, DemoState> {
        // A panicking handler must not take the demo down with it
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    /// Make `/status` (and every other endpoint) answer 503
    pub fn set_online(&self, online: bool) {
        self.lock().offline = !online;
    }

    #[cfg(test)]
    /// Requests served so far, oldest first
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    #[cfg(test)]
    /// Count requests whose recorded line starts with `prefix`
    pub fn count_requests(&self, prefix: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }

    #[cfg(test)]
    pub fn persons(&self) -> Vec<Person> {
        self.lock().persons.clone()
    }

    pub fn router(&self) -> Router {
        let routes = Router::new()
            .route("/status", get(status))
            .route("/personas", get(list_personas).post(create_persona))
            .route("/personas/dni/:dni", get(find_by_dni))
            .route("/personas/:id", delete(delete_persona))
            .route_layer(middleware::from_fn_with_state(self.clone(), availability));

        Router::new()
            .nest(API_PREFIX, routes)
            .layer(middleware::from_fn_with_state(self.clone(), record_request))
            .with_state(self.clone())
    }

    /// Bind and serve in a background task
    pub async fn spawn(&self, bind: &str) -> Result<DemoServer> {
        let listener = TcpListener::bind(bind)
            .await
            .with_context(|| format!("Failed to bind demo backend to {}", bind))?;
        let addr = listener.local_addr().context("Demo backend has no address")?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = self.router();

        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_rx.await.ok();
                })
                .await;
            if let Err(e) = result {
                tracing::error!("Demo backend error: {}", e);
            }
        });

        tracing::info!("Demo backend listening on {}", addr);

        Ok(DemoServer {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }
}

impl DemoState {
    fn insert(&mut self, new: NewPerson) -> Person {
        self.next_id += 1;
        let person = Person {
            id: PersonId::new(self.next_id.to_string()),
            dni: new.dni,
            nombre: new.nombre,
            apellido: new.apellido,
            trabajo: new.trabajo,
        };
        self.persons.push(person.clone());
        person
    }
}

/// A running demo backend; shuts down when dropped
pub struct DemoServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl DemoServer {
    /// Base URL to hand to `ApiClient`
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    /// Stop serving and wait for the task to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for DemoServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Run the demo backend in the foreground until Ctrl+C
pub async fn serve_until_ctrl_c(bind: &str) -> Result<()> {
    let backend = DemoBackend::seeded();
    let server = backend.spawn(bind).await?;
    println!("Demo backend listening on {}", server.base_url());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    server.shutdown().await;
    tracing::info!("Demo backend stopped");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Middleware
// ─────────────────────────────────────────────────────────────────────────────

async fn record_request(State(backend): State<DemoBackend>, req: Request, next: Next) -> Response {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let path = path_and_query
        .strip_prefix(API_PREFIX)
        .unwrap_or(&path_and_query);
    let line = format!("{} {}", req.method(), path);
    tracing::debug!("Demo backend: {}", line);
    backend.lock().requests.push(line);

    next.run(req).await
}

async fn availability(State(backend): State<DemoBackend>, req: Request, next: Next) -> Response {
    if backend.lock().offline {
        return (StatusCode::SERVICE_UNAVAILABLE, "backend offline").into_response();
    }
    next.run(req).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

async fn status() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    trabajo: Option<String>,
}

async fn list_personas(
    State(backend): State<DemoBackend>,
    Query(params): Query<ListParams>,
) -> Response {
    let filter = match params.trabajo.as_deref() {
        None | Some("") => TrabajoFilter::Todos,
        Some(value) => match value.parse::<TrabajoFilter>() {
            Ok(filter) => filter,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
        },
    };
    let needle = params.q.to_lowercase();

    let state = backend.lock();
    let matches: Vec<Person> = state
        .persons
        .iter()
        .filter(|p| filter.matches(p.trabajo))
        .filter(|p| {
            needle.is_empty()
                || p.dni.contains(&needle)
                || p.nombre.to_lowercase().contains(&needle)
                || p.apellido.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    Json(matches).into_response()
}

async fn find_by_dni(State(backend): State<DemoBackend>, Path(dni): Path<String>) -> Response {
    let state = backend.lock();
    match state.persons.iter().find(|p| p.dni == dni) {
        Some(person) => Json(person.clone()).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Persona no encontrada"),
    }
}

async fn create_persona(State(backend): State<DemoBackend>, Json(new): Json<NewPerson>) -> Response {
    if new.dni.is_empty() || !new.dni.chars().all(|c| c.is_ascii_digit()) {
        return error_response(StatusCode::BAD_REQUEST, "DNI inválido");
    }
    if new.nombre.trim().is_empty() || new.apellido.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Nombre y apellido son obligatorios.",
        );
    }

    let mut state = backend.lock();
    if state.persons.iter().any(|p| p.dni == new.dni) {
        let message = format!("El DNI '{}' ya está registrado.", new.dni);
        return error_response(StatusCode::CONFLICT, message);
    }

    let person = state.insert(new);
    (StatusCode::CREATED, Json(person)).into_response()
}

async fn delete_persona(State(backend): State<DemoBackend>, Path(id): Path<String>) -> Response {
    let mut state = backend.lock();
    let before = state.persons.len();
    state.persons.retain(|p| p.id.as_str() != id);

    if state.persons.len() == before {
        error_response(StatusCode::NOT_FOUND, "Persona no encontrada")
    } else {
        Json(json!({ "message": "Persona eliminada" })).into_response()
    }
}
