//! Configuration tests
//!
//! Round-trip checks guard the hand-written TOML template: when a field is
//! added to `Config`, these fail until `to_toml()` and `FileConfig` agree.

use super::*;
use crate::dashboard::ConceptMatch;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(resolved.api_url, DEFAULT_API_URL);
    assert_eq!(resolved.payload_path, None);
    assert_eq!(resolved.snapshot.output_dir, PathBuf::from("."));
    assert_eq!(resolved.dashboard.concept_match, ConceptMatch::Substring);
    assert_eq!(resolved.logging.files, None);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.api_url = "http://scanner.local:5000".to_string();
    config.payload_path = Some(PathBuf::from("data/scan \"today\".json"));
    config.snapshot.output_dir = PathBuf::from("snapshots");
    config.snapshot.font_dirs = vec![PathBuf::from("/usr/share/fonts/noto-cjk")];
    config.dashboard.concept_match = ConceptMatch::Token;
    config.logging.files = Some(LogFiles {
        dir: PathBuf::from("var/log"),
        rotation: LogRotation::Hourly,
    });

    let toml_str = config.to_toml();
    let parsed: FileConfig = toml::from_str(&toml_str)
        .unwrap_or_else(|e| panic!("customized config should parse: {e}\n{toml_str}"));
    let resolved = Config::resolve(parsed, no_env);

    assert_eq!(resolved.api_url, "http://scanner.local:5000");
    assert_eq!(
        resolved.payload_path,
        Some(PathBuf::from("data/scan \"today\".json"))
    );
    assert_eq!(resolved.snapshot.output_dir, PathBuf::from("snapshots"));
    assert_eq!(
        resolved.snapshot.font_dirs,
        vec![PathBuf::from("/usr/share/fonts/noto-cjk")]
    );
    assert_eq!(resolved.dashboard.concept_match, ConceptMatch::Token);
    assert_eq!(
        resolved.logging.files,
        Some(LogFiles {
            dir: PathBuf::from("var/log"),
            rotation: LogRotation::Hourly,
        })
    );
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
api_url = "http://from-file:5000"
payload_path = "file.json"

[snapshot]
output_dir = "file-snapshots"
"#,
    )
    .unwrap();

    let env = env_from(&[
        ("SCANBOARD_API_URL", "http://from-env:5000"),
        ("SCANBOARD_SNAPSHOT_DIR", "env-snapshots"),
        ("SCANBOARD_NO_TUI", "1"),
    ]);
    let config = Config::resolve(file, env);

    assert_eq!(config.api_url, "http://from-env:5000");
    assert_eq!(config.payload_path, Some(PathBuf::from("file.json")));
    assert_eq!(config.snapshot.output_dir, PathBuf::from("env-snapshots"));
    assert!(!config.enable_tui);
}

#[test]
fn test_empty_file_uses_defaults() {
    let file: FileConfig = toml::from_str("").unwrap();
    let config = Config::resolve(file, no_env);
    assert!(config.enable_tui);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.files.is_none());
}

#[test]
fn test_unknown_values_fall_back() {
    let file: FileConfig = toml::from_str(
        r#"
[dashboard]
concept_match = "fuzzy"

[logging]
file_dir = "logs"
rotation = "weekly"
"#,
    )
    .unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.dashboard.concept_match, ConceptMatch::Substring);
    assert_eq!(
        config.logging.files.map(|files| files.rotation),
        Some(LogRotation::Daily)
    );
}

#[test]
fn test_log_dir_env_enables_file_logging() {
    let file: FileConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
    let config = Config::resolve(file, env_from(&[("SCANBOARD_LOG_DIR", "/tmp/scanboard")]));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.logging.files,
        Some(LogFiles {
            dir: PathBuf::from("/tmp/scanboard"),
            rotation: LogRotation::Daily,
        })
    );
}
