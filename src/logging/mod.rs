// Logging module - subscriber setup and in-memory capture for the TUI
//
// In TUI mode log events are captured into a bounded buffer and shown in the
// log strip, so they never break through the alternate screen. Headless mode
// writes to stderr. Either way, JSON file logging can be layered on top.

use crate::config::{LogFiles, LoggingConfig, LOG_FILE_PREFIX};
use anyhow::{Context as _, Result};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 200;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    /// Get the display string for this log level
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a log entry, dropping the oldest when full
    pub fn add(&self, entry: LogEntry) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The most recent `n` entries, oldest first
    pub fn latest(&self, n: usize) -> Vec<LogEntry> {
        let Ok(entries) = self.entries.lock() else {
            return Vec::new();
        };
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }
}

/// Tracing layer that captures events into a [`LogBuffer`]
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        self.buffer.add(LogEntry {
            timestamp: Local::now(),
            level: LogLevel::from(event.metadata().level()),
            message,
        });
    }
}

/// Visitor to extract the message from a tracing event
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            *self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        }
    }
}

/// Rolling appender for the configured log directory, created if missing
fn rolling_appender(files: &LogFiles) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(&files.dir)
        .with_context(|| format!("Could not create log directory {}", files.dir.display()))?;
    RollingFileAppender::builder()
        .rotation(files.rotation.rotation())
        .filename_prefix(LOG_FILE_PREFIX)
        .build(&files.dir)
        .with_context(|| format!("Could not open log files in {}", files.dir.display()))
}

/// Install the global subscriber.
///
/// Precedence for the filter: RUST_LOG env var > config level.
/// The returned guard must live for the whole program so file logs flush.
pub fn init(
    config: &LoggingConfig,
    log_buffer: Option<&LogBuffer>,
) -> Result<Option<WorkerGuard>> {
    let default_filter = format!("scanboard={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Captured in TUI mode, stderr otherwise
    let tui_layer = log_buffer.map(|buffer| TuiLogLayer::new(buffer.clone()));
    let stderr_layer = log_buffer
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = match config.files.as_ref().map(rolling_appender) {
        Some(Ok(appender)) => {
            // Writes happen on a background thread
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            eprintln!("Warning: file logging disabled: {:#}", e);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Info,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_buffer_is_bounded() {
        let buffer = LogBuffer::new();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            buffer.add(entry(&i.to_string()));
        }
        assert_eq!(buffer.latest(usize::MAX).len(), MAX_LOG_ENTRIES);
        assert_eq!(buffer.latest(1)[0].message, (MAX_LOG_ENTRIES + 9).to_string());
    }

    #[test]
    fn test_latest_is_oldest_first() {
        let buffer = LogBuffer::new();
        for msg in ["a", "b", "c"] {
            buffer.add(entry(msg));
        }
        let latest: Vec<_> = buffer.latest(2).into_iter().map(|e| e.message).collect();
        assert_eq!(latest, vec!["b", "c"]);
        assert_eq!(buffer.latest(10).len(), 3);
    }

    #[test]
    fn test_layer_captures_events() {
        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("复制失败: {}", "no display");
        });

        let entries = buffer.latest(1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[0].message, "复制失败: no display");
    }

    #[test]
    fn test_rolling_appender_creates_log_dir() {
        let root = tempfile::tempdir().unwrap();
        let files = LogFiles {
            dir: root.path().join("logs").join("json"),
            rotation: crate::config::LogRotation::Never,
        };
        assert!(rolling_appender(&files).is_ok());
        assert!(files.dir.is_dir());
    }
}
