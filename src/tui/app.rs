//! `PanelApp` - screen state for the audit panel.
//!
//! The session owns the fetch lifecycle; this type owns what is on
//! screen: the report being displayed, which category sections are
//! expanded, the row cursor, and any overlays.

use crate::report::{AnalysisReport, Category, Diagnostic};
use crate::session::{CycleFailure, CycleState};
use chrono::{DateTime, Local};

/// Screen state for the panel TUI.
pub struct PanelApp {
    /// Report currently on screen (kept visible under the fetch modal)
    pub report: Option<AnalysisReport>,

    /// Failure replacing the results, if the last cycle failed
    pub failure: Option<CycleFailure>,

    /// Whether a fetch is in flight (drives the blocking modal)
    pub loading: bool,

    /// Per-category expansion, indexed by [`Category::idx`]
    pub expanded: [bool; 3],

    /// Cursor into the flattened list of visible finding rows
    cursor: usize,

    /// Show help overlay
    pub show_help: bool,

    /// Show the detail popup for the selected finding
    pub show_info: bool,

    /// Status message shown in the footer until the next key press
    pub status_message: Option<String>,

    /// When the report on screen was received
    pub last_updated: Option<DateTime<Local>>,

    /// Should quit
    pub should_quit: bool,

    /// Animation tick counter
    pub tick: u64,
}

impl Default for PanelApp {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelApp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            report: None,
            failure: None,
            loading: false,
            expanded: [false; 3],
            cursor: 0,
            show_help: false,
            show_info: false,
            status_message: None,
            last_updated: None,
            should_quit: false,
            tick: 0,
        }
    }

    /// Fold the latest session state into the screen.
    ///
    /// A new report replaces the previous one wholesale: expansion and
    /// cursor are recomputed from the fresh data, never merged.
    pub fn sync(&mut self, state: &CycleState) {
        match state {
            CycleState::Idle => {}
            CycleState::Loading => {
                self.loading = true;
                self.show_info = false;
                self.failure = None;
            }
            CycleState::Ready(report) => {
                self.loading = false;
                self.failure = None;
                self.apply_report(report.clone());
            }
            CycleState::Failed(failure) => {
                self.loading = false;
                self.show_info = false;
                self.report = None;
                self.failure = Some(failure.clone());
            }
        }
    }

    /// Install a fresh report: categories with findings start expanded,
    /// clean categories start collapsed.
    fn apply_report(&mut self, report: AnalysisReport) {
        for category in Category::ALL {
            self.expanded[category.idx()] = !report.group(category).is_empty();
        }
        self.report = Some(report);
        self.cursor = 0;
        self.show_info = false;
        self.last_updated = Some(Local::now());
    }

    /// Visible finding rows in display order, as (category, row) pairs.
    ///
    /// Rows of collapsed sections are not listed, so the cursor can only
    /// rest on something the user can see.
    pub fn visible_rows(&self) -> Vec<(Category, usize)> {
        let Some(report) = &self.report else {
            return Vec::new();
        };

        let mut rows = Vec::new();
        for category in Category::ALL {
            if self.expanded[category.idx()] {
                for row in 0..report.group(category).len() {
                    rows.push((category, row));
                }
            }
        }
        rows
    }

    /// The (category, row) pair under the cursor.
    pub fn selected(&self) -> Option<(Category, usize)> {
        self.visible_rows().get(self.cursor).copied()
    }

    /// The diagnostic under the cursor.
    pub fn selected_diagnostic(&self) -> Option<&Diagnostic> {
        let (category, row) = self.selected()?;
        self.report.as_ref()?.group(category).get(row)
    }

    /// Row index under the cursor within the given category's table.
    pub fn selected_row_in(&self, category: Category) -> Option<usize> {
        match self.selected() {
            Some((selected, row)) if selected == category => Some(row),
            _ => None,
        }
    }

    pub fn select_next(&mut self) {
        let last = self.visible_rows().len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Toggle one category section, keeping the cursor on a visible row.
    pub fn toggle_section(&mut self, category: Category) {
        let anchor = self.selected();
        self.expanded[category.idx()] = !self.expanded[category.idx()];

        // Follow the previously selected row if it is still visible,
        // otherwise clamp into the new row list.
        let rows = self.visible_rows();
        self.cursor = anchor
            .and_then(|sel| rows.iter().position(|&row| row == sel))
            .unwrap_or_else(|| self.cursor.min(rows.len().saturating_sub(1)));
        if rows.is_empty() {
            self.cursor = 0;
            self.show_info = false;
        }
    }

    /// Open the detail popup if the selected finding carries guidance.
    pub fn open_info(&mut self) {
        match self.selected_diagnostic() {
            Some(diag) if diag.info.is_some() => self.show_info = true,
            Some(_) => self.set_status("no further guidance for this finding"),
            None => {}
        }
    }

    /// Smartview link of the report on screen, if the service provided one.
    pub fn smartview_url(&self) -> Option<String> {
        self.report
            .as_ref()
            .map(|r| r.smartview_url.clone())
            .filter(|url| !url.is_empty())
    }

    /// Full report link of the report on screen, if the service provided one.
    pub fn report_url(&self) -> Option<String> {
        self.report
            .as_ref()
            .map(|r| r.report_url.clone())
            .filter(|url| !url.is_empty())
    }

    /// Help video link of the selected finding, if it has one.
    pub fn selected_video_url(&self) -> Option<String> {
        self.selected_diagnostic()?.video.clone()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
