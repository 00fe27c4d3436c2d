// scanboard - Terminal dashboard for stock scan results
//
// Loads a scan payload (file, stdin or the scan API), then either runs the
// interactive dashboard or performs one headless action.
//
// Architecture:
// - Dashboard: filter engine + presentation shell over an immutable payload
// - Clipboard / Snapshot: the two exports, invoked by shell actions
// - TUI (ratatui): pure render functions over the shell's derived outputs
// - API client (reqwest): optional payload source and strategy listing

mod api;
mod cli;
mod clipboard;
mod config;
mod dashboard;
mod logging;
mod snapshot;
mod tui;
mod util;

use anyhow::{Context, Result};
use api::ScanApi;
use clap::Parser;
use cli::{Cli, Commands, SourceArgs};
use clipboard::SystemClipboard;
use config::{Config, VERSION};
use dashboard::{Payload, Shell};
use logging::LogBuffer;
use snapshot::SnapshotCompositor;
use std::io::Read;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management runs before anything touches the config file
    if let Some(Commands::Config { show, reset, path }) = &cli.command {
        return cli::handle_config(*show, *reset, *path);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env()?;

    // In TUI mode logs are captured for the log strip instead of stderr
    let interactive = cli.command.is_none() && config.enable_tui;
    let log_buffer = LogBuffer::new();
    let _log_guard = logging::init(&config.logging, interactive.then_some(&log_buffer))?;

    tracing::debug!("scanboard {} (api: {})", VERSION, config.api_url);

    match cli.command {
        None if interactive => {
            let shell = build_shell(&cli.source, &config).await?;
            tracing::info!("Starting TUI");
            tui::run_tui(shell, log_buffer).await?;
        }
        None => {
            tracing::info!("TUI disabled, printing results");
            let shell = build_shell(&cli.source, &config).await?;
            cli::run_list(&shell);
        }
        Some(Commands::List { filter }) => {
            let mut shell = build_shell(&cli.source, &config).await?;
            cli::apply_filter_args(&mut shell, &filter);
            cli::run_list(&shell);
        }
        Some(Commands::Copy { filter }) => {
            let mut shell = build_shell(&cli.source, &config).await?;
            cli::apply_filter_args(&mut shell, &filter);
            tracing::info!("Copying codes for {}", cli::describe_filter(&filter));
            cli::run_copy(&mut shell);
        }
        Some(Commands::Snapshot { filter }) => {
            let mut shell = build_shell(&cli.source, &config).await?;
            cli::apply_filter_args(&mut shell, &filter);
            tracing::info!("Saving snapshot for {}", cli::describe_filter(&filter));
            cli::run_snapshot(&mut shell)?;
        }
        Some(Commands::Strategies) => cli::run_strategies(&config).await?,
        Some(Commands::Health) => cli::run_health(&config).await?,
        Some(Commands::Config { .. }) => {}
    }

    Ok(())
}

/// Load the payload and wire the shell to the real clipboard and compositor
async fn build_shell(source: &SourceArgs, config: &Config) -> Result<Shell> {
    let payload = load_payload(source, config).await?;
    let compositor = SnapshotCompositor::new(
        config.snapshot.output_dir.clone(),
        config.snapshot.font_dirs.clone(),
    );
    Ok(Shell::new(payload, Box::new(SystemClipboard), compositor)
        .with_concept_match(config.dashboard.concept_match))
}

/// Payload source precedence: --payload > --scan > configured file > empty
async fn load_payload(source: &SourceArgs, config: &Config) -> Result<Payload> {
    if let Some(path) = &source.payload {
        return read_payload_file(path);
    }

    if let Some(strategy) = &source.scan {
        let api = ScanApi::new(&config.api_url)?;
        return api
            .scan(strategy)
            .await
            .with_context(|| format!("Scan '{}' failed at {}", strategy, config.api_url));
    }

    if let Some(path) = &config.payload_path {
        return read_payload_file(path);
    }

    tracing::info!("No payload given, starting with an empty dashboard");
    Ok(Payload::default())
}

/// Read a payload from a JSON file, or stdin when the path is `-`
fn read_payload_file(path: &Path) -> Result<Payload> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read payload from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload {}", path.display()))?
    };

    let payload = Payload::from_json_str(&text)
        .with_context(|| format!("Invalid payload JSON in {}", path.display()))?;
    tracing::info!(
        "Loaded {} results from {} ({})",
        payload.results.len(),
        path.display(),
        payload.strategy_display_name
    );
    Ok(payload)
}
