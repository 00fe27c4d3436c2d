//! Stage styling table
//!
//! Process-wide constant mapping stage labels to their card colours and
//! descriptions. Labels missing from the table render with neutral styling.

/// Visual configuration for one lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConfig {
    pub label: &'static str,
    /// Card/badge background (hex)
    pub background: &'static str,
    /// Card border (hex)
    pub border: &'static str,
    /// Card text (hex)
    pub text: &'static str,
    pub description: &'static str,
}

pub const STAGE_TOP_PRIORITY: &str = "🚀 启动期（重中之重）";
pub const STAGE_KEY_LAUNCH: &str = "🚀 启动期（重点）";
pub const STAGE_LAUNCH: &str = "🚀 启动期";
pub const STAGE_ACCUMULATING: &str = "🧪 蓄势中";
pub const STAGE_CONSOLIDATING: &str = "🏖️ 整理区";

const STAGES: [StageConfig; 5] = [
    StageConfig {
        label: STAGE_TOP_PRIORITY,
        background: "#ffe4e6",
        border: "#f43f5e",
        text: "#881337",
        description: "近5日跌破三连阳最低价且收盘下跌，最强烈信号",
    },
    StageConfig {
        label: STAGE_KEY_LAUNCH,
        background: "#fef2f2",
        border: "#f87171",
        text: "#991b1b",
        description: "出现关键突破形态，强烈建议关注",
    },
    StageConfig {
        label: STAGE_LAUNCH,
        background: "#fffbeb",
        border: "#fbbf24",
        text: "#92400e",
        description: "已突破 + 回踩确认，建议关注",
    },
    StageConfig {
        label: STAGE_ACCUMULATING,
        background: "#eff6ff",
        border: "#60a5fa",
        text: "#1e40af",
        description: "吸筹完成 + 洗盘结束，等待突破",
    },
    StageConfig {
        label: STAGE_CONSOLIDATING,
        background: "#ecfdf5",
        border: "#34d399",
        text: "#065f46",
        description: "吸筹中或横盘整理，观察为主",
    },
];

/// Stages shown as summary cards, in display order
pub const STAGE_DISPLAY_ORDER: [&str; 4] = [
    STAGE_KEY_LAUNCH,
    STAGE_LAUNCH,
    STAGE_ACCUMULATING,
    STAGE_CONSOLIDATING,
];

/// Look up the styling for a stage label
pub fn stage_config(label: &str) -> Option<&'static StageConfig> {
    STAGES.iter().find(|config| config.label == label)
}

/// Resolve a stage typed on the command line to its full label.
///
/// Accepts the full label or the label without its emoji prefix
/// (`蓄势中` → `🧪 蓄势中`). Anything else passes through unchanged,
/// since payloads may carry stages missing from the table.
pub fn resolve_stage_label(input: &str) -> String {
    let input = input.trim();
    STAGES
        .iter()
        .find(|config| {
            config.label == input
                || config.label.split_once(' ').map(|(_, name)| name) == Some(input)
        })
        .map(|config| config.label.to_string())
        .unwrap_or_else(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_stages_are_configured() {
        for label in STAGE_DISPLAY_ORDER {
            assert!(stage_config(label).is_some(), "missing config for {label}");
        }
    }

    #[test]
    fn test_unknown_stage_has_no_config() {
        assert!(stage_config("🌋 未知阶段").is_none());
        assert!(stage_config("").is_none());
    }

    #[test]
    fn test_resolve_stage_label() {
        assert_eq!(resolve_stage_label("蓄势中"), STAGE_ACCUMULATING);
        assert_eq!(resolve_stage_label("启动期"), STAGE_LAUNCH);
        assert_eq!(resolve_stage_label("启动期（重点）"), STAGE_KEY_LAUNCH);
        assert_eq!(resolve_stage_label(STAGE_CONSOLIDATING), STAGE_CONSOLIDATING);
        assert_eq!(resolve_stage_label(" 🌋 未知阶段 "), "🌋 未知阶段");
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = STAGES.iter().map(|s| s.label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), STAGES.len());
    }
}
