// Startup module - banner printed before the TUI takes over the screen
//
// Shows version, where the settings came from, and which backend the
// session talks to. The same facts are logged into the TUI's log panel.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Backend the session was started against
pub struct BackendInfo<'a> {
    pub url: &'a str,
    /// In-process demo backend
    pub demo: bool,
}

/// Print the startup banner
pub fn print_startup(config: &Config, backend: &BackendInfo<'_>) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}DNI Desk{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Gestión de DNI{RESET}");
    println!();

    let source = Config::source_description();
    if source == "defaults" {
        println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
    } else {
        println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", source);
    }
    println!("  {DIM}Theme:{RESET}  {}", config.theme);
    println!();

    println!("  {MAGENTA}▸{RESET} Backend {BOLD}{}{RESET}", backend.url);
    if backend.demo {
        println!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(in-memory backend){RESET}");
    }
    println!();
}

/// Print startup messages to the TUI log panel
pub fn log_startup(config: &Config, backend: &BackendInfo<'_>) {
    tracing::info!("═══════════════════════════════════");
    tracing::info!("  DNI DESK v{}", VERSION);
    tracing::info!("═══════════════════════════════════");
    tracing::info!("  Config: {}", Config::source_description());
    tracing::info!(
        "  Search minimum: {} characters",
        config.search_min_chars
    );
    tracing::info!("▸ Backend {}", backend.url);

    if backend.demo {
        tracing::info!("▸ Demo mode active (in-memory backend)");
    }

    tracing::info!("Ready.");
}
