// CLI module - command-line argument parsing and headless handlers
//
// With no subcommand the interactive dashboard starts. Subcommands cover
// scripted use:
// - list / copy / snapshot: the dashboard actions, with --stage/--concept
// - strategies / health: scan API queries
// - config --show/--path/--reset: configuration management

use crate::api::ScanApi;
use crate::config::{Config, VERSION};
use crate::dashboard::shell::ALL_LABEL;
use crate::dashboard::stage::resolve_stage_label;
use crate::dashboard::{ChangeDirection, Shell, SnapshotOutcome};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// scanboard - dashboard for stock scan results
#[derive(Parser, Debug)]
#[command(name = "scanboard")]
#[command(version = VERSION)]
#[command(about = "Filter, copy and snapshot stock scan results", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the payload comes from. Precedence: --payload > --scan > config.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Payload JSON file ('-' reads stdin)
    #[arg(long, global = true, value_name = "FILE")]
    pub payload: Option<PathBuf>,

    /// Run a scan on the API and use its result
    #[arg(long, global = true, value_name = "STRATEGY")]
    pub scan: Option<String>,
}

/// Filter selection for headless commands
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Stage label, with or without its emoji (e.g. 蓄势中)
    #[arg(long)]
    pub stage: Option<String>,

    /// Concept tag (e.g. 半导体)
    #[arg(long)]
    pub concept: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the filtered results
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Copy the filtered codes to the clipboard
    Copy {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Save a PNG snapshot of the filtered results
    Snapshot {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List strategies offered by the scan API
    Strategies,

    /// Check that the scan API is reachable
    Health,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Config subcommand
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else {
        // No flag provided, show help
        println!("Usage: scanboard config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default().save()?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard actions
// ─────────────────────────────────────────────────────────────────────────────

/// Apply --stage/--concept to the shell
pub fn apply_filter_args(shell: &mut Shell, filter: &FilterArgs) {
    if let Some(stage) = &filter.stage {
        shell.set_stage_filter(resolve_stage_label(stage));
    }
    if let Some(concept) = &filter.concept {
        shell.set_concept_filter(concept.trim());
    }
}

pub fn run_list(shell: &Shell) {
    let payload = shell.payload();
    println!(
        "{} | 扫描 {} | 命中 {} | 命中率 {:.2}%",
        payload.strategy_display_name,
        payload.total_scanned,
        payload.total_hit,
        payload.hit_rate()
    );
    println!("{} ({} 只)", shell.filter_label(), shell.filtered_count());
    println!();

    for result in shell.filtered() {
        let arrow = match result.change_direction() {
            ChangeDirection::Up => "📈",
            ChangeDirection::Down => "📉",
            ChangeDirection::Unknown => "  ",
        };
        println!(
            "{}\t{}\t{}\t¥{}\t{} {}\t{}",
            result.stage,
            result.code,
            result.name,
            result.price,
            arrow,
            result.change,
            result.concepts.as_deref().unwrap_or("")
        );
    }

    let codes = shell.code_strip();
    if !codes.is_empty() {
        println!();
        println!("{}", codes);
    }
}

/// Copy the filtered codes. The codes are echoed to stdout as well, since a
/// native clipboard may not outlive a short-lived process on every platform.
pub fn run_copy(shell: &mut Shell) {
    let copied = shell.copy_all_codes();
    if copied {
        println!("{}", shell.code_strip());
    }
    report_notification(shell);
}

pub fn run_snapshot(shell: &mut Shell) -> Result<()> {
    let outcome = shell.save_snapshot();
    report_notification(shell);
    match outcome {
        SnapshotOutcome::Saved(path) => {
            println!("{}", path.display());
            Ok(())
        }
        SnapshotOutcome::Empty => Ok(()),
        SnapshotOutcome::Failed(e) => bail!("snapshot failed: {}", e),
    }
}

fn report_notification(shell: &Shell) {
    if let Some(message) = shell.notification() {
        eprintln!("{}", message);
    }
}

/// Describe the headless selection for log lines
pub fn describe_filter(filter: &FilterArgs) -> String {
    match (&filter.stage, &filter.concept) {
        (None, None) => ALL_LABEL.to_string(),
        (stage, concept) => [stage.as_deref(), concept.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" + "),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scan API
// ─────────────────────────────────────────────────────────────────────────────

pub async fn run_strategies(config: &Config) -> Result<()> {
    let api = ScanApi::new(&config.api_url)?;
    let strategies = api
        .strategies()
        .await
        .with_context(|| format!("Failed to list strategies from {}", config.api_url))?;

    if strategies.is_empty() {
        println!("(no strategies)");
    }
    for strategy in strategies {
        if strategy.description.is_empty() {
            println!("{}", strategy.id);
        } else {
            println!("{}\t{}", strategy.id, strategy.description);
        }
    }
    Ok(())
}

pub async fn run_health(config: &Config) -> Result<()> {
    let api = ScanApi::new(&config.api_url)?;
    if api.health().await {
        println!("ok ({})", config.api_url);
        Ok(())
    } else {
        bail!("scan API at {} is not healthy", config.api_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::RecordingClipboard;
    use crate::dashboard::Payload;
    use crate::snapshot::SnapshotCompositor;
    use serde_json::json;
    use std::sync::Arc;

    fn shell() -> (Shell, Arc<RecordingClipboard>) {
        let payload = Payload::from_value(&json!({
            "results": [
                { "code": "600001", "name": "甲", "stage": "🧪 蓄势中", "concepts": "AI / 半导体" },
                { "code": "000002", "name": "乙", "stage": "🚀 启动期", "concepts": "银行" }
            ]
        }));
        let clipboard = Arc::new(RecordingClipboard::default());
        let shell = Shell::new(
            payload,
            Box::new(clipboard.clone()),
            SnapshotCompositor::new(".", Vec::new()),
        );
        (shell, clipboard)
    }

    #[test]
    fn test_parse_subcommand_with_filters() {
        let cli = Cli::parse_from([
            "scanboard",
            "copy",
            "--stage",
            "蓄势中",
            "--payload",
            "scan.json",
        ]);
        assert_eq!(cli.source.payload, Some(PathBuf::from("scan.json")));
        match cli.command {
            Some(Commands::Copy { filter }) => {
                assert_eq!(filter.stage.as_deref(), Some("蓄势中"));
                assert_eq!(filter.concept, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_no_subcommand() {
        let cli = Cli::parse_from(["scanboard", "--scan", "volume_breakout"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.source.scan.as_deref(), Some("volume_breakout"));
    }

    #[test]
    fn test_apply_filter_args_resolves_stage() {
        let (mut shell, _) = shell();
        apply_filter_args(
            &mut shell,
            &FilterArgs {
                stage: Some("蓄势中".into()),
                concept: None,
            },
        );
        assert_eq!(shell.selection().stage.as_deref(), Some("🧪 蓄势中"));
        assert_eq!(shell.code_strip(), "600001");
    }

    #[test]
    fn test_run_copy_uses_clipboard() {
        let (mut shell, clipboard) = shell();
        apply_filter_args(
            &mut shell,
            &FilterArgs {
                stage: None,
                concept: Some("银行".into()),
            },
        );
        run_copy(&mut shell);
        assert_eq!(clipboard.copies(), vec!["000002".to_string()]);
    }

    #[test]
    fn test_run_snapshot_empty_is_not_an_error() {
        let (mut shell, _) = shell();
        shell.set_concept_filter("不存在");
        assert!(run_snapshot(&mut shell).is_ok());
    }

    #[test]
    fn test_describe_filter() {
        assert_eq!(describe_filter(&FilterArgs::default()), ALL_LABEL);
        let both = FilterArgs {
            stage: Some("蓄势中".into()),
            concept: Some("AI".into()),
        };
        assert_eq!(describe_filter(&both), "蓄势中 + AI");
    }
}
