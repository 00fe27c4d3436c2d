//! `[logging]` section
//!
//! Logs always go to the TUI log strip (interactive) or stderr (headless).
//! Setting `file_dir` adds rolling JSON files on top.

use serde::Deserialize;
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::rolling::Rotation;

/// Prefix of every JSON log file (`scanboard.2026-10-19`)
pub const LOG_FILE_PREFIX: &str = "scanboard";

/// How often JSON log files roll over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl FromStr for LogRotation {
    type Err = Infallible;

    /// Unknown values roll daily
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        })
    }
}

impl LogRotation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }

    pub fn rotation(self) -> Rotation {
        match self {
            Self::Hourly => Rotation::HOURLY,
            Self::Daily => Rotation::DAILY,
            Self::Never => Rotation::NEVER,
        }
    }
}

/// Where JSON log files are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFiles {
    pub dir: PathBuf,
    pub rotation: LogRotation,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for the `scanboard` target; RUST_LOG replaces the whole filter
    pub level: String,
    /// `None` disables file logging
    pub files: Option<LogFiles>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            files: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_dir: Option<String>,
    pub rotation: Option<String>,
}

impl LoggingConfig {
    /// Build from the file section; `env_log_dir` wins over `file_dir`
    pub fn from_file(file: Option<FileLogging>, env_log_dir: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let rotation = file
            .rotation
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            level: file.level.unwrap_or_else(|| Self::default().level),
            files: env_log_dir
                .or(file.file_dir)
                .filter(|dir| !dir.is_empty())
                .map(|dir| LogFiles {
                    dir: PathBuf::from(dir),
                    rotation,
                }),
        }
    }
}
