//! Dashboard and snapshot settings

use crate::dashboard::ConceptMatch;
use serde::Deserialize;
use std::path::PathBuf;

/// Snapshot output settings
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Directory PNG snapshots are written to
    pub output_dir: PathBuf,
    /// Extra font directories (system fonts are always loaded)
    pub font_dirs: Vec<PathBuf>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            font_dirs: Vec::new(),
        }
    }
}

/// Snapshot settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileSnapshot {
    pub output_dir: Option<String>,
    pub font_dirs: Option<Vec<String>>,
}

impl SnapshotConfig {
    /// Create from file config, with the env override for the output directory
    pub fn from_file(file: Option<FileSnapshot>, env_output_dir: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            output_dir: env_output_dir
                .or(file.output_dir)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            font_dirs: file
                .font_dirs
                .map(|dirs| dirs.into_iter().map(PathBuf::from).collect())
                .unwrap_or(defaults.font_dirs),
        }
    }
}

/// Filtering behaviour
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    /// How concept filters match: raw substring (default) or exact tag
    pub concept_match: ConceptMatch,
}

/// Dashboard settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDashboard {
    pub concept_match: Option<String>,
}

impl DashboardConfig {
    pub fn from_file(file: Option<FileDashboard>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            concept_match: file
                .concept_match
                .and_then(|s| s.parse::<ConceptMatch>().ok())
                .unwrap_or_default(),
        }
    }
}
