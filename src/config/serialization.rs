//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{Config, LogRotation};
use std::path::Path;

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

fn quoted_path(path: &Path) -> String {
    quoted(&path.display().to_string())
}

impl Config {
    /// Serialize config to TOML string
    pub fn to_toml(&self) -> String {
        let payload_line = match &self.payload_path {
            Some(path) => format!("payload_path = {}", quoted_path(path)),
            None => "# payload_path = \"./scan_result.json\"".to_string(),
        };
        let (log_dir_line, log_rotation) = match &self.logging.files {
            Some(files) => (
                format!("file_dir = {}", quoted_path(&files.dir)),
                files.rotation,
            ),
            None => (
                "# file_dir = \"./logs\"".to_string(),
                LogRotation::default(),
            ),
        };
        let font_dirs = self
            .snapshot
            .font_dirs
            .iter()
            .map(|dir| quoted_path(dir))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"# scanboard configuration

# Scan API base URL (used by --scan, strategies, health)
api_url = {api_url}

# Payload file loaded when no --payload/--scan is given
{payload_line}

# Snapshot output
[snapshot]
output_dir = {output_dir}
# Extra font directories, e.g. for a CJK font (system fonts are always loaded)
font_dirs = [{font_dirs}]

# Filtering
[dashboard]
# substring: raw containment on the joined concept string ("AI" also matches "AI芯片")
# token: exact match against a single concept tag
concept_match = "{concept_match}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# JSON log files, written in addition to the TUI log strip or stderr
{log_dir_line}
rotation = "{log_rotation}"  # hourly, daily, never
"#,
            api_url = quoted(&self.api_url),
            payload_line = payload_line,
            output_dir = quoted_path(&self.snapshot.output_dir),
            font_dirs = font_dirs,
            concept_match = self.dashboard.concept_match.as_str(),
            log_level = quoted(&self.logging.level),
            log_dir_line = log_dir_line,
            log_rotation = log_rotation.as_str(),
        )
    }
}
