//! Application state: the sampling core plus everything the UI tracks

use std::time::Instant;

use crate::system::{HostSource, OsControl, ProcessControl, SampleSource};

use super::actions::ActionTarget;
use super::overlay::{OverlayState, TickOutcome};
use super::view_mode::{Tab, ViewMode};

/// Application state
pub struct App<S: SampleSource = HostSource, C: ProcessControl = OsControl> {
    /// Sampling core: histories, snapshot, filtered view
    pub overlay: OverlayState<S, C>,
    /// Currently shown tab
    pub tab: Tab,
    /// Current input mode
    pub view_mode: ViewMode,
    /// Selected row in the current tab's list
    pub selected_index: usize,
    /// First visible row of the current tab's list
    pub scroll_offset: usize,
    /// List rows that fit on screen, updated by the renderer
    pub visible_rows: usize,
    /// Highlighted entry in the action menu
    pub menu_index: usize,
    /// Target of the open action menu or kill confirmation
    pub pending_target: Option<ActionTarget>,
    /// Outcome of the last action, or a prompt
    pub status_message: Option<String>,
}

impl<S: SampleSource, C: ProcessControl> App<S, C> {
    pub fn new(overlay: OverlayState<S, C>) -> Self {
        Self {
            overlay,
            tab: Tab::default(),
            view_mode: ViewMode::default(),
            selected_index: 0,
            scroll_offset: 0,
            visible_rows: 10,
            menu_index: 0,
            pending_target: None,
            status_message: None,
        }
    }

    /// Advances the sampling core and keeps the selection in range.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.overlay.tick(now);
        if outcome != TickOutcome::Idle {
            self.clamp_selection();
        }
        outcome
    }

    /// Number of rows in the current tab's list.
    pub fn list_len(&self) -> usize {
        let view = self.overlay.filtered();
        match self.tab {
            Tab::Performance => 0,
            Tab::Processes => view.processes.len(),
            Tab::Services => view.services.len(),
            Tab::Network => self.overlay.interfaces().len(),
        }
    }

    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Switches tab and resets the selection.
    pub fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.selected_index = 0;
            self.scroll_offset = 0;
        }
    }

    /// The row under the cursor as an action target.
    pub fn selected_target(&self) -> Option<ActionTarget> {
        let view = self.overlay.filtered();
        match self.tab {
            Tab::Processes => view
                .processes
                .get(self.selected_index)
                .map(|p| ActionTarget::Process {
                    pid: p.pid,
                    name: p.name.clone(),
                }),
            Tab::Services => view
                .services
                .get(self.selected_index)
                .map(|s| ActionTarget::Service {
                    name: s.name.clone(),
                }),
            Tab::Performance | Tab::Network => None,
        }
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    pub fn start_search(&mut self) {
        if !self.tab.is_searchable() {
            self.select_tab(Tab::Processes);
        }
        self.view_mode = ViewMode::SearchInput;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.overlay.push_search_char(c);
        self.clamp_selection();
    }

    pub fn pop_search_char(&mut self) {
        self.overlay.pop_search_char();
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.overlay.clear_search();
        self.clamp_selection();
    }

    // ------------------------------------------------------------------
    // Sampling interval
    // ------------------------------------------------------------------

    pub fn slow_down_sampling(&mut self) {
        self.overlay.slow_down_sampling();
        self.status_message = Some(format!(
            "Sampling every {}",
            self.overlay.sample_interval_label()
        ));
    }

    pub fn speed_up_sampling(&mut self) {
        self.overlay.speed_up_sampling();
        self.status_message = Some(format!(
            "Sampling every {}",
            self.overlay.sample_interval_label()
        ));
    }
}
