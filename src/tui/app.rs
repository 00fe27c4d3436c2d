// TUI application state
//
// Wraps the presentation shell with the cursor and focus state that only the
// terminal needs. All dashboard state changes go through the shell.

use super::theme::Theme;
use crate::dashboard::stage::STAGE_DISPLAY_ORDER;
use crate::dashboard::Shell;
use crate::logging::LogBuffer;
use chrono::{DateTime, Local};
use std::time::Instant;

/// Panel receiving navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Concepts,
    #[default]
    Table,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Concepts => Focus::Table,
            Focus::Table => Focus::Concepts,
        }
    }
}

/// Main application state for the TUI
pub struct App {
    pub shell: Shell,

    pub focus: Focus,

    /// Highlighted entry in the concept cloud
    pub concept_cursor: usize,

    /// Selected row in the filtered table
    pub row_cursor: usize,

    /// Highlighted concept chip within the selected row
    pub chip_cursor: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Log buffer for the log strip
    pub log_buffer: LogBuffer,

    /// When the dashboard was opened (header report time)
    pub opened_at: DateTime<Local>,

    pub theme: Theme,
}

impl App {
    pub fn new(shell: Shell, log_buffer: LogBuffer) -> Self {
        Self {
            shell,
            focus: Focus::default(),
            concept_cursor: 0,
            row_cursor: 0,
            chip_cursor: 0,
            should_quit: false,
            log_buffer,
            opened_at: Local::now(),
            theme: Theme::default(),
        }
    }

    /// Stage cards currently shown: display order, zero counts hidden
    pub fn visible_stages(&self) -> Vec<&'static str> {
        STAGE_DISPLAY_ORDER
            .iter()
            .copied()
            .filter(|stage| self.shell.stage_count(stage) > 0)
            .collect()
    }

    // ─── Filter actions ──────────────────────────────────────

    /// Select the n-th visible stage card (0-based)
    pub fn select_stage_card(&mut self, index: usize) {
        if let Some(stage) = self.visible_stages().get(index) {
            self.shell.set_stage_filter(*stage);
            self.after_filter_change();
        }
    }

    /// Apply the concept under the cloud cursor
    pub fn apply_cloud_concept(&mut self) {
        if let Some(concept) = self.shell.concepts().get(self.concept_cursor).cloned() {
            self.shell.set_concept_filter(concept);
            self.after_filter_change();
        }
    }

    /// Apply the highlighted concept chip of the selected row
    pub fn apply_row_chip(&mut self) {
        let Some(concept) = self
            .selected_chips()
            .get(self.chip_cursor)
            .map(|c| c.to_string())
        else {
            return;
        };
        self.shell.set_concept_filter(concept);
        self.after_filter_change();
    }

    pub fn reset_filters(&mut self) {
        self.shell.reset_filters();
        self.after_filter_change();
    }

    fn after_filter_change(&mut self) {
        self.row_cursor = 0;
        self.chip_cursor = 0;
    }

    // ─── Export actions ──────────────────────────────────────

    pub fn copy_all_codes(&mut self) {
        self.shell.copy_all_codes();
    }

    pub fn copy_code_strip(&mut self) {
        self.shell.copy_code_strip();
    }

    pub fn copy_selected_quote_url(&mut self) {
        self.shell.copy_quote_url(self.row_cursor);
    }

    pub fn save_snapshot(&mut self) {
        self.shell.save_snapshot();
    }

    pub fn tick(&mut self, now: Instant) {
        self.shell.tick(now);
    }

    // ─── Navigation ──────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Concepts => self.concept_cursor = self.concept_cursor.saturating_sub(1),
            Focus::Table => {
                self.row_cursor = self.row_cursor.saturating_sub(1);
                self.chip_cursor = 0;
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Concepts => {
                let last = self.shell.concepts().len().saturating_sub(1);
                self.concept_cursor = (self.concept_cursor + 1).min(last);
            }
            Focus::Table => {
                let last = self.shell.filtered_count().saturating_sub(1);
                self.row_cursor = (self.row_cursor + 1).min(last);
                self.chip_cursor = 0;
            }
        }
    }

    pub fn move_left(&mut self) {
        match self.focus {
            Focus::Concepts => self.move_up(),
            Focus::Table => self.chip_cursor = self.chip_cursor.saturating_sub(1),
        }
    }

    pub fn move_right(&mut self) {
        match self.focus {
            Focus::Concepts => self.move_down(),
            Focus::Table => {
                let last = self.selected_chips().len().saturating_sub(1);
                self.chip_cursor = (self.chip_cursor + 1).min(last);
            }
        }
    }

    /// Enter applies whatever the focused panel highlights
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Concepts => self.apply_cloud_concept(),
            Focus::Table => self.apply_row_chip(),
        }
    }

    /// Concept tags of the selected row
    pub fn selected_chips(&self) -> Vec<&str> {
        self.shell
            .filtered()
            .get(self.row_cursor)
            .copied()
            .map(|result| result.concept_tags())
            .unwrap_or_default()
    }
}
