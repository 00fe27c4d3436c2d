//! Snapshot compositor
//!
//! Renders the filtered stock list as a fixed-layout PNG grid and writes it
//! to the snapshot directory.
//!
//! ```text
//! stocks ──► layout::compose ──► Scene ──► render::rasterize ──► PNG file
//! ```

pub mod layout;
pub mod render;

pub use layout::SnapshotStock;

use chrono::Local;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Failures while producing a snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot document: {0}")]
    Svg(String),
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Characters that are unsafe in file names
const UNSAFE_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Make a filter label safe for use in a file name.
///
/// Path-unsafe characters are removed first, then whitespace runs become a
/// single `_`, so "AI / 半导体" yields "AI_半导体".
pub fn sanitize_label(label: &str) -> String {
    let stripped: String = label
        .chars()
        .filter(|c| !UNSAFE_FILENAME_CHARS.contains(c))
        .collect();
    whitespace_run().replace_all(&stripped, "_").into_owned()
}

/// File name for a snapshot of `strategy_label` filtered by `filter_label`.
///
/// The strategy name comes from the backend, so path separators and other
/// unsafe characters are dropped from it too. Its whitespace is kept.
pub fn snapshot_filename(strategy_label: &str, filter_label: &str) -> String {
    let strategy: String = strategy_label
        .chars()
        .filter(|c| !UNSAFE_FILENAME_CHARS.contains(c))
        .collect();
    format!(
        "strategy_snapshot_{}_{}.png",
        strategy,
        sanitize_label(filter_label)
    )
}

/// Local wall-clock time in the dashboard's display format
pub fn local_timestamp() -> String {
    Local::now().format("%Y/%-m/%-d %H:%M:%S").to_string()
}

/// Renders snapshots into an output directory
#[derive(Debug, Clone)]
pub struct SnapshotCompositor {
    output_dir: PathBuf,
    font_dirs: Vec<PathBuf>,
}

impl SnapshotCompositor {
    pub fn new(output_dir: impl Into<PathBuf>, font_dirs: Vec<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            font_dirs,
        }
    }

    /// Render and write a snapshot, returning the written path
    pub fn render(
        &self,
        stocks: &[SnapshotStock],
        strategy_label: &str,
        filter_label: &str,
    ) -> Result<PathBuf, SnapshotError> {
        let scene = layout::compose(stocks, strategy_label, filter_label, &local_timestamp());
        let png = render::rasterize(&scene, &self.font_dirs)?;

        let path = self
            .output_dir
            .join(snapshot_filename(strategy_label, filter_label));
        std::fs::create_dir_all(&self.output_dir)
            .and_then(|_| std::fs::write(&path, &png))
            .map_err(|source| SnapshotError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::info!(
            "Snapshot saved: {} ({} stocks, {} bytes)",
            path.display(),
            stocks.len(),
            png.len()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_for_concept_label() {
        assert_eq!(
            snapshot_filename("ma5", "AI / 半导体"),
            "strategy_snapshot_ma5_AI_半导体.png"
        );
    }

    #[test]
    fn test_filename_for_stage_label() {
        assert_eq!(
            snapshot_filename("ma5", "🚀 启动期（重点）"),
            "strategy_snapshot_ma5_🚀_启动期（重点）.png"
        );
        assert_eq!(
            snapshot_filename("volume_breakout", "全部标的"),
            "strategy_snapshot_volume_breakout_全部标的.png"
        );
    }

    #[test]
    fn test_strategy_name_cannot_leave_output_dir() {
        assert_eq!(
            snapshot_filename("../../etc/ma5", "全部标的"),
            "strategy_snapshot_....etcma5_全部标的.png"
        );

        let dir = tempfile::tempdir().unwrap();
        let compositor = SnapshotCompositor::new(dir.path(), Vec::new());
        let stocks = vec![SnapshotStock {
            code: "600001".to_string(),
            name: "浦发银行".to_string(),
        }];
        let path = compositor.render(&stocks, "..\\ma5/x", "全部标的").unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
    }

    #[test]
    fn test_sanitize_strips_unsafe_characters() {
        assert_eq!(sanitize_label(r#"a/b\c:d*e?f"g<h>i|j"#), "abcdefghij");
        assert_eq!(sanitize_label("  leading\tand\n\ntrailing  "), "_leading_and_trailing_");
        assert_eq!(sanitize_label(""), "");
    }

    #[test]
    fn test_timestamp_shape() {
        let stamp = local_timestamp();
        let (date, time) = stamp.split_once(' ').unwrap();
        assert_eq!(date.split('/').count(), 3);
        assert_eq!(time.split(':').count(), 3);
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let compositor = SnapshotCompositor::new(dir.path().join("out"), Vec::new());
        let stocks = vec![SnapshotStock {
            code: "600001".to_string(),
            name: "浦发银行".to_string(),
        }];

        let path = compositor.render(&stocks, "ma5", "AI / 半导体").unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("strategy_snapshot_ma5_AI_半导体.png")
        );
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
