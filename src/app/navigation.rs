//! Selection movement over the current tab's list

use crate::system::{ProcessControl, SampleSource};

use super::state::App;

impl<S: SampleSource, C: ProcessControl> App<S, C> {
    /// Moves selection up by one row.
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Moves selection down by one row.
    pub fn move_down(&mut self) {
        if self.selected_index < self.list_len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    /// Moves selection up by one page.
    pub fn page_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(self.visible_rows.max(1));
    }

    /// Moves selection down by one page.
    pub fn page_down(&mut self) {
        self.selected_index =
            (self.selected_index + self.visible_rows.max(1)).min(self.list_len().saturating_sub(1));
    }

    pub fn jump_to_start(&mut self) {
        self.selected_index = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.selected_index = self.list_len().saturating_sub(1);
    }

    /// Keeps the selected row inside the visible window.
    pub fn adjust_scroll(&mut self) {
        let rows = self.visible_rows.max(1);
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + rows {
            self.scroll_offset = self.selected_index + 1 - rows;
        }
        let max_offset = self.list_len().saturating_sub(rows);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}
