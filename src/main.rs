// DNI Desk - terminal client for a DNI person-records backend
//
// Look up a person by DNI, register the ones that are missing, and browse,
// search, filter and delete the registered ones.
//
// Architecture:
// - api: typed HTTP client (reqwest) for the backend endpoints
// - lookup / directory: pure state machines that return effects
// - desk: root container routing effects and outcomes between them
// - worker: runs commands as tokio tasks, reports over an mpsc channel
// - tui (ratatui): renders state, turns keys into messages
// - demo (axum): in-memory backend for --demo, serve-demo and tests

mod api;
mod cli;
mod commands;
mod config;
mod demo;
mod desk;
mod directory;
mod field;
mod logging;
mod lookup;
mod startup;
mod tui;
mod worker;

use anyhow::{Context, Result};
use api::ApiClient;
use cli::CliAction;
use config::Config;
use demo::DemoBackend;
use logging::{LogBuffer, TuiLogLayer};
use startup::BackendInfo;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // One-shot commands (config --show, ...) run here and exit
    let action = cli::handle_cli();
    if action == CliAction::Exit {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let CliAction::Tui { demo: true } = action {
        config.demo_mode = true;
    }

    let log_buffer = LogBuffer::new();
    let headless = matches!(action, CliAction::ServeDemo { .. });

    // The guard must stay alive for the whole run so file logs flush
    let _file_guard = init_tracing(&config, headless, &log_buffer);

    if let CliAction::ServeDemo { bind } = action {
        return demo::serve_until_ctrl_c(&bind).await;
    }

    let demo_server = if config.demo_mode {
        let server = DemoBackend::seeded()
            .spawn("127.0.0.1:0")
            .await
            .context("Failed to start demo backend")?;
        Some(server)
    } else {
        None
    };

    let api_url = demo_server
        .as_ref()
        .map(|server| server.base_url())
        .unwrap_or_else(|| config.api_url.clone());
    let backend = BackendInfo {
        url: &api_url,
        demo: config.demo_mode,
    };

    startup::print_startup(&config, &backend);
    startup::log_startup(&config, &backend);

    let api = ApiClient::new(&api_url)?;

    tracing::info!("Starting TUI");
    let result = tui::run_tui(api, log_buffer, config).await;

    tracing::info!("Shutting down...");
    if let Some(server) = demo_server {
        server.shutdown().await;
    }

    result
}

/// Install the global subscriber
///
/// TUI mode captures events into the log buffer (nothing may write to the
/// alternate screen); headless mode prints to stdout. File logging adds a
/// JSON layer on a non-blocking rolling appender.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(config: &Config, headless: bool, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("warn,dni_desk={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if config.logging.file_enabled {
        match config.logging.appender() {
            Ok(file_appender) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                // Fall back to non-file logging
                eprintln!(
                    "Warning: file logging disabled, cannot open {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let tui_layer = (!headless).then(|| TuiLogLayer::new(log_buffer.clone()));
    let stdout_layer = headless.then(|| tracing_subscriber::fmt::layer());

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
