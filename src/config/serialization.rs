//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the full config file, comments included
    pub fn to_toml(&self) -> String {
        format!(
            r#"# dni-desk configuration

# Backend base URL (DNI_DESK_API_URL overrides)
api_url = "{api_url}"

# Theme: dark, light (DNI_DESK_THEME overrides)
theme = "{theme}"

# Directory search: shorter terms list everyone
search_min_chars = {min_chars}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the TUI log panel or stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_url = toml_escape(&self.api_url),
            theme = toml_escape(&self.theme),
            min_chars = self.search_min_chars,
            log_level = toml_escape(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_escape(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = toml_escape(&self.logging.file_prefix),
        )
    }
}

/// Escape a value for a basic (double-quoted) TOML string
fn toml_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
