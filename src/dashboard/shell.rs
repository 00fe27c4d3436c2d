//! Presentation shell
//!
//! Owns the dashboard's mutable state (filter selection and notification)
//! and exposes every user action as a method. Render code only reads the
//! derived outputs.

use super::filter::{self, ConceptMatch, FilterSelection};
use super::notify::Notifier;
use super::payload::{Payload, ScanResult};
use crate::clipboard::ClipboardAdapter;
use crate::snapshot::{SnapshotCompositor, SnapshotStock};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

/// Label used when no filter is active
pub const ALL_LABEL: &str = "全部标的";

pub const MSG_COPIED: &str = "✅ 已复制到剪贴板";
pub const MSG_NOTHING_TO_COPY: &str = "⚠️ 没有可复制的代码";
pub const MSG_SNAPSHOT_SAVED: &str = "✅ 快照已保存";
pub const MSG_NOTHING_TO_SNAPSHOT: &str = "⚠️ 没有可保存的股票";

/// Result of a snapshot request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOutcome {
    Saved(PathBuf),
    /// Nothing matched the current filters
    Empty,
    Failed(String),
}

/// Dashboard state and actions
pub struct Shell {
    payload: Payload,
    selection: FilterSelection,
    concept_match: ConceptMatch,
    notifier: Notifier,
    clipboard: Box<dyn ClipboardAdapter>,
    compositor: SnapshotCompositor,
    // The payload is immutable, so these are computed once
    stage_counts: BTreeMap<String, usize>,
    concepts: Vec<String>,
}

impl Shell {
    pub fn new(
        payload: Payload,
        clipboard: Box<dyn ClipboardAdapter>,
        compositor: SnapshotCompositor,
    ) -> Self {
        let stage_counts = filter::stage_counts(&payload.results);
        let concepts = filter::concept_universe(&payload.results);
        Self {
            payload,
            selection: FilterSelection::default(),
            concept_match: ConceptMatch::default(),
            notifier: Notifier::default(),
            clipboard,
            compositor,
            stage_counts,
            concepts,
        }
    }

    /// Use a different concept matching mode
    pub fn with_concept_match(mut self, mode: ConceptMatch) -> Self {
        self.concept_match = mode;
        self
    }

    // ─── Actions ─────────────────────────────────────────────

    pub fn set_stage_filter(&mut self, stage: impl Into<String>) {
        let stage = stage.into();
        tracing::debug!("Stage filter: {}", stage);
        self.selection.stage = Some(stage);
    }

    pub fn set_concept_filter(&mut self, concept: impl Into<String>) {
        let concept = concept.into();
        tracing::debug!("Concept filter: {}", concept);
        self.selection.concept = Some(concept);
    }

    pub fn reset_filters(&mut self) {
        tracing::debug!("Filters reset");
        self.selection = FilterSelection::default();
    }

    /// Show a transient message; it auto-clears unless superseded
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notifier.show(message, Instant::now());
    }

    /// Fire due auto-clears. Call from the UI tick.
    pub fn tick(&mut self, now: Instant) {
        self.notifier.tick(now);
    }

    /// Copy the filtered codes. Returns false when there was nothing to copy.
    pub fn copy_all_codes(&mut self) -> bool {
        let codes = self.code_strip();
        if codes.is_empty() {
            self.notify(MSG_NOTHING_TO_COPY);
            return false;
        }
        self.clipboard.copy(&codes);
        self.notify(MSG_COPIED);
        true
    }

    /// Copy the code strip as shown, even when it is empty
    pub fn copy_code_strip(&mut self) {
        let codes = self.code_strip();
        self.clipboard.copy(&codes);
        self.notify(MSG_COPIED);
    }

    /// Copy the quote page URL of the filtered result at `index`
    pub fn copy_quote_url(&mut self, index: usize) -> bool {
        let Some(url) = self.filtered().get(index).map(|r| r.quote_url()) else {
            return false;
        };
        self.clipboard.copy(&url);
        self.notify(MSG_COPIED);
        true
    }

    /// Render the filtered results to a PNG snapshot
    pub fn save_snapshot(&mut self) -> SnapshotOutcome {
        let stocks: Vec<SnapshotStock> = self
            .filtered()
            .into_iter()
            .map(|r| SnapshotStock {
                code: r.code.clone(),
                name: r.name.clone(),
            })
            .collect();

        if stocks.is_empty() {
            self.notify(MSG_NOTHING_TO_SNAPSHOT);
            return SnapshotOutcome::Empty;
        }

        let filter_label = self.snapshot_filter_label().to_string();
        match self
            .compositor
            .render(&stocks, &self.payload.strategy_name, &filter_label)
        {
            Ok(path) => {
                self.notify(MSG_SNAPSHOT_SAVED);
                SnapshotOutcome::Saved(path)
            }
            Err(e) => {
                tracing::error!("Snapshot failed: {}", e);
                self.notify(format!("❌ 快照保存失败: {}", e));
                SnapshotOutcome::Failed(e.to_string())
            }
        }
    }

    // ─── Derived outputs ─────────────────────────────────────

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Count for a stage (zero when absent)
    pub fn stage_count(&self, stage: &str) -> usize {
        self.stage_counts.get(stage).copied().unwrap_or(0)
    }

    pub fn concepts(&self) -> &[String] {
        &self.concepts
    }

    pub fn filtered(&self) -> Vec<&ScanResult> {
        filter::apply_filters(&self.payload.results, &self.selection, self.concept_match)
    }

    pub fn filtered_count(&self) -> usize {
        self.payload
            .results
            .iter()
            .filter(|r| filter::matches_selection(r, &self.selection, self.concept_match))
            .count()
    }

    /// Filtered codes joined with commas
    pub fn code_strip(&self) -> String {
        self.filtered()
            .iter()
            .map(|r| r.code.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Description of the active filter for the toolbar
    pub fn filter_label(&self) -> String {
        match (&self.selection.concept, &self.selection.stage) {
            (Some(concept), _) => format!("概念: {}", concept),
            (None, Some(stage)) => stage.clone(),
            (None, None) => ALL_LABEL.to_string(),
        }
    }

    /// Filter label embedded in snapshot titles and file names
    pub fn snapshot_filter_label(&self) -> &str {
        self.selection
            .concept
            .as_deref()
            .or(self.selection.stage.as_deref())
            .unwrap_or(ALL_LABEL)
    }

    /// Currently visible notification message
    pub fn notification(&self) -> Option<&str> {
        self.notifier.visible_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::RecordingClipboard;
    use crate::dashboard::payload::Payload;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn sample_payload() -> Payload {
        Payload::from_value(&json!({
            "strategyName": "ma5",
            "strategyDisplayName": "MA5均线支撑策略",
            "totalScanned": 5000,
            "totalHit": 3,
            "results": [
                { "code": "600001", "name": "浦发银行", "stage": "🚀 启动期", "concepts": "AI / 半导体", "fullCode": "sh600001" },
                { "code": "600002", "name": "邯郸钢铁", "stage": "🧪 蓄势中", "concepts": "AI", "fullCode": "sh600002" },
                { "code": "000003", "name": "万科A", "stage": "🧪 蓄势中", "concepts": null, "fullCode": "sz000003" }
            ]
        }))
    }

    fn shell_with(payload: Payload, dir: &std::path::Path) -> (Shell, Arc<RecordingClipboard>) {
        let clipboard = Arc::new(RecordingClipboard::default());
        let shell = Shell::new(
            payload,
            Box::new(clipboard.clone()),
            SnapshotCompositor::new(dir, Vec::new()),
        );
        (shell, clipboard)
    }

    #[test]
    fn test_derived_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let (shell, _) = shell_with(sample_payload(), dir.path());
        assert_eq!(shell.stage_count("🧪 蓄势中"), 2);
        assert_eq!(shell.stage_count("🏖️ 整理区"), 0);
        assert_eq!(shell.concepts(), ["AI", "半导体"]);
        assert_eq!(shell.filtered_count(), 3);
        assert_eq!(shell.code_strip(), "600001,600002,000003");
        assert_eq!(shell.filter_label(), "全部标的");
    }

    #[test]
    fn test_stage_then_concept_cross_filter() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _) = shell_with(sample_payload(), dir.path());

        shell.set_stage_filter("🧪 蓄势中");
        assert_eq!(shell.code_strip(), "600002,000003");
        assert_eq!(shell.filter_label(), "🧪 蓄势中");

        shell.set_concept_filter("AI");
        assert_eq!(shell.code_strip(), "600002");
        assert_eq!(shell.filter_label(), "概念: AI");
        assert_eq!(shell.snapshot_filter_label(), "AI");

        // Re-selecting the same stage keeps it selected
        shell.set_stage_filter("🧪 蓄势中");
        assert_eq!(shell.selection().stage.as_deref(), Some("🧪 蓄势中"));
    }

    #[test]
    fn test_reset_restores_unfiltered_set() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _) = shell_with(sample_payload(), dir.path());
        shell.set_concept_filter("半导体");
        shell.set_stage_filter("🏖️ 整理区");
        assert_eq!(shell.filtered_count(), 0);

        shell.reset_filters();
        assert!(shell.selection().is_empty());
        assert_eq!(shell.filtered_count(), 3);
    }

    #[test]
    fn test_copy_all_codes() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, clipboard) = shell_with(sample_payload(), dir.path());
        shell.set_concept_filter("AI");

        assert!(shell.copy_all_codes());
        assert_eq!(clipboard.copies(), vec!["600001,600002"]);
        assert_eq!(shell.notification(), Some(MSG_COPIED));
    }

    #[test]
    fn test_copy_all_codes_when_empty_warns() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, clipboard) = shell_with(sample_payload(), dir.path());
        shell.set_stage_filter("🏖️ 整理区");

        assert!(!shell.copy_all_codes());
        assert!(clipboard.copies().is_empty());
        assert_eq!(shell.notification(), Some(MSG_NOTHING_TO_COPY));
    }

    #[test]
    fn test_code_strip_copies_even_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, clipboard) = shell_with(Payload::default(), dir.path());
        shell.copy_code_strip();
        assert_eq!(clipboard.copies(), vec![""]);
        assert_eq!(shell.notification(), Some(MSG_COPIED));
    }

    #[test]
    fn test_copy_quote_url() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, clipboard) = shell_with(sample_payload(), dir.path());
        assert!(shell.copy_quote_url(2));
        assert!(!shell.copy_quote_url(3));
        assert_eq!(
            clipboard.copies(),
            vec!["https://quote.eastmoney.com/concept/sz000003.html"]
        );
    }

    #[test]
    fn test_snapshot_with_no_results_warns() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _) = shell_with(sample_payload(), dir.path());
        shell.set_concept_filter("机器人");

        assert_eq!(shell.save_snapshot(), SnapshotOutcome::Empty);
        assert_eq!(shell.notification(), Some(MSG_NOTHING_TO_SNAPSHOT));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_snapshot_uses_filter_label_in_filename() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _) = shell_with(sample_payload(), dir.path());
        shell.set_concept_filter("AI / 半导体");

        let outcome = shell.save_snapshot();
        let expected = dir.path().join("strategy_snapshot_ma5_AI_半导体.png");
        assert_eq!(outcome, SnapshotOutcome::Saved(expected.clone()));
        assert!(expected.exists());
        assert_eq!(shell.notification(), Some(MSG_SNAPSHOT_SAVED));
    }

    #[test]
    fn test_snapshot_prefers_concept_over_stage_label() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _) = shell_with(sample_payload(), dir.path());
        shell.set_stage_filter("🧪 蓄势中");
        assert_eq!(shell.snapshot_filter_label(), "🧪 蓄势中");
        shell.set_concept_filter("AI");

        let outcome = shell.save_snapshot();
        let expected = dir.path().join("strategy_snapshot_ma5_AI.png");
        assert_eq!(outcome, SnapshotOutcome::Saved(expected.clone()));
        assert!(expected.exists());
    }

    #[test]
    fn test_notification_auto_clears_after_tick() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _) = shell_with(sample_payload(), dir.path());
        shell.notify("hello");
        shell.tick(Instant::now());
        assert_eq!(shell.notification(), Some("hello"));

        shell.tick(Instant::now() + Duration::from_secs(3));
        assert_eq!(shell.notification(), None);
    }

    #[test]
    fn test_token_mode_shell() {
        let dir = tempfile::tempdir().unwrap();
        let (shell, _) = shell_with(sample_payload(), dir.path());
        let mut shell = shell.with_concept_match(ConceptMatch::Token);
        shell.set_concept_filter("AI / 半导体");
        assert_eq!(shell.filtered_count(), 0);
    }
}
