//! Clipboard adapter
//!
//! Prefers the native clipboard via `arboard`. When that is unavailable
//! (headless Linux, no display server, permission denied) it falls back to
//! piping the text through a platform helper such as `wl-copy` or `xclip`.
//!
//! Callers never see a failure: errors are logged and swallowed, so the
//! dashboard can always report a copy as done.

use anyhow::{bail, Context, Result};
use arboard::Clipboard;
use std::io::Write;
use std::process::{Command, Stdio};
#[cfg(test)]
use std::sync::Mutex;

/// Something that can place text on the clipboard
pub trait ClipboardAdapter {
    /// Copy `text`. Infallible from the caller's point of view.
    fn copy(&self, text: &str);
}

/// Helper programs tried in order when the native clipboard fails
const FALLBACK_HELPERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip", &[]),
];

/// The real system clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardAdapter for SystemClipboard {
    fn copy(&self, text: &str) {
        match copy_native(text) {
            Ok(()) => tracing::debug!("Copied {} bytes to clipboard", text.len()),
            Err(native_err) => {
                tracing::debug!("Native clipboard unavailable: {:#}", native_err);
                if let Err(e) = copy_with_helper(text) {
                    tracing::warn!("复制失败: {:#}", e);
                }
            }
        }
    }
}

/// Copy text to the native clipboard.
/// The clipboard is created fresh each time to avoid holding resources.
fn copy_native(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Pipe text into the first helper program that runs successfully.
/// The child is always waited on, so no process outlives the call.
fn copy_with_helper(text: &str) -> Result<()> {
    for (program, args) in FALLBACK_HELPERS {
        let child = Command::new(program)
            .args(*args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(_) => continue,
        };

        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for {}", program))?;

        write_result.with_context(|| format!("Failed to write to {}", program))?;
        if status.success() {
            tracing::debug!("Copied {} bytes via {}", text.len(), program);
            return Ok(());
        }
        tracing::debug!("{} exited with {}", program, status);
    }
    bail!("no clipboard helper available")
}

/// Records copies instead of touching the system clipboard
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    copies: Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingClipboard {
    pub fn copies(&self) -> Vec<String> {
        self.copies.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl ClipboardAdapter for RecordingClipboard {
    fn copy(&self, text: &str) {
        if let Ok(mut copies) = self.copies.lock() {
            copies.push(text.to_string());
        }
    }
}

#[cfg(test)]
impl<T: ClipboardAdapter + ?Sized> ClipboardAdapter for std::sync::Arc<T> {
    fn copy(&self, text: &str) {
        (**self).copy(text)
    }
}
