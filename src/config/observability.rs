//! `[logging]` section: filter level and the optional JSON log file

use serde::Deserialize;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// How often the JSON log file starts a new segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// Keep appending to one file
    Never,
}

impl LogRotation {
    /// Case-insensitive; anything unrecognised means daily
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("hourly") {
            Self::Hourly
        } else if s.eq_ignore_ascii_case("never") {
            Self::Never
        } else {
            Self::Daily
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }

    fn rotation(self) -> Rotation {
        match self {
            Self::Hourly => Rotation::HOURLY,
            Self::Daily => Rotation::DAILY,
            Self::Never => Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for the `dni_desk` target; other crates stay at warn
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// Segment names are `<prefix>.<date>`
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::default(),
            file_prefix: "dni-desk".to_string(),
        }
    }
}

/// `[logging]` as written in config.toml; every key optional
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let mut config = Self::default();
        let Some(file) = file else {
            return config;
        };

        if let Some(level) = file.level {
            config.level = level;
        }
        if let Some(enabled) = file.file_enabled {
            config.file_enabled = enabled;
        }
        if let Some(dir) = file.file_dir {
            config.file_dir = PathBuf::from(dir);
        }
        if let Some(rotation) = file.file_rotation.as_deref() {
            config.file_rotation = LogRotation::parse(rotation);
        }
        if let Some(prefix) = file.file_prefix {
            config.file_prefix = prefix;
        }
        config
    }

    /// Open the rolling appender, creating `file_dir` when missing
    pub fn appender(&self) -> std::io::Result<RollingFileAppender> {
        std::fs::create_dir_all(&self.file_dir)?;
        RollingFileAppender::builder()
            .rotation(self.file_rotation.rotation())
            .filename_prefix(&self.file_prefix)
            .build(&self.file_dir)
            .map_err(std::io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_parse_ignores_case() {
        assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
        assert_eq!(LogRotation::parse("Never"), LogRotation::Never);
        assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = LoggingConfig::from_file(Some(FileLogging {
            level: Some("debug".to_string()),
            file_rotation: Some("hourly".to_string()),
            ..FileLogging::default()
        }));

        assert_eq!(config.level, "debug");
        assert_eq!(config.file_rotation, LogRotation::Hourly);
        assert!(!config.file_enabled);
        assert_eq!(config.file_prefix, "dni-desk");
    }

    #[test]
    fn test_appender_creates_missing_directory() {
        let dir = std::env::temp_dir().join(format!("dni-desk-logs-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = LoggingConfig {
            file_dir: dir.join("nested"),
            file_rotation: LogRotation::Never,
            ..LoggingConfig::default()
        };

        assert!(config.appender().is_ok());
        assert!(config.file_dir.is_dir());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
