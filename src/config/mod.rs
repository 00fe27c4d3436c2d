//! Configuration for the dashboard
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/scanboard/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod dashboard;
mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use dashboard::{DashboardConfig, FileDashboard, FileSnapshot, SnapshotConfig};
pub use logging::{FileLogging, LogFiles, LogRotation, LoggingConfig, LOG_FILE_PREFIX};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default scan API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Scan API base URL
    pub api_url: String,

    /// Payload file loaded when no source is given on the command line
    pub payload_path: Option<PathBuf>,

    /// Whether to run the TUI (disabled for headless use)
    pub enable_tui: bool,

    /// Snapshot output settings
    pub snapshot: SnapshotConfig,

    /// Filtering behaviour
    pub dashboard: DashboardConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            payload_path: None,
            enable_tui: true,
            snapshot: SnapshotConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub payload_path: Option<String>,

    /// Optional [snapshot] section
    pub snapshot: Option<FileSnapshot>,

    /// Optional [dashboard] section
    pub dashboard: Option<FileDashboard>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/scanboard/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("scanboard").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists.
    ///
    /// A config file that exists but cannot be read or parsed is an error:
    /// silently falling back to defaults would hide the typo.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file config with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("SCANBOARD_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Payload file: env > file > none
        let payload_path = env("SCANBOARD_PAYLOAD")
            .or(file.payload_path)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("SCANBOARD_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        let snapshot = SnapshotConfig::from_file(file.snapshot, env("SCANBOARD_SNAPSHOT_DIR"));
        let dashboard = DashboardConfig::from_file(file.dashboard);
        let logging = LoggingConfig::from_file(file.logging, env("SCANBOARD_LOG_DIR"));

        Self {
            api_url,
            payload_path,
            enable_tui,
            snapshot,
            dashboard,
            logging,
        }
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("Could not determine config path")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        std::fs::write(&path, self.to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
