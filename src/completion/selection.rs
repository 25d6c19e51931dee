//! Dropdown selection state
//!
//! Tracks whether the dropdown is open, which row is highlighted, and which
//! window of rows is scrolled into view.

/// Selection state for the suggestion dropdown
#[derive(Debug, Clone)]
pub struct SelectionState {
    /// Highlighted row (None = nothing highlighted)
    selected_index: Option<usize>,
    open: bool,
    /// First visible row
    scroll_offset: usize,
    max_visible: usize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(crate::config::CompletionConfig::default().max_visible_rows)
    }
}

impl SelectionState {
    pub fn new(max_visible: usize) -> Self {
        Self {
            selected_index: None,
            open: false,
            scroll_offset: 0,
            max_visible: max_visible.max(1),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the dropdown. Closing always drops the highlight.
    pub fn close(&mut self) {
        self.open = false;
        self.clear_selection();
    }

    pub fn clear_selection(&mut self) {
        self.selected_index = None;
        self.scroll_offset = 0;
    }

    /// Move the highlight down one row, stopping at the last row, and open the dropdown
    pub fn select_next(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }

        let next = match self.selected_index {
            Some(current) => (current + 1).min(row_count - 1),
            None => 0,
        };
        self.selected_index = Some(next);
        self.open = true;
        self.scroll_into_view(next);
    }

    /// Move the highlight up one row. Moving up from the first row leaves
    /// nothing highlighted but keeps the dropdown open.
    pub fn select_previous(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }

        self.selected_index = match self.selected_index {
            Some(0) | None => None,
            Some(current) => Some((current - 1).min(row_count - 1)),
        };
        self.open = true;
        if let Some(index) = self.selected_index {
            self.scroll_into_view(index);
        }
    }

    /// Highlight a specific row (pointer hover). Out-of-range rows are ignored.
    pub fn select_index(&mut self, index: usize, row_count: usize) {
        if index < row_count {
            self.selected_index = Some(index);
            self.scroll_into_view(index);
        }
    }

    /// Re-establish the bounds after the row list was recomputed
    pub fn clamp_to(&mut self, row_count: usize) {
        if row_count == 0 {
            self.clear_selection();
            return;
        }
        if let Some(index) = self.selected_index
            && index >= row_count
        {
            self.selected_index = None;
        }
        self.scroll_offset = self
            .scroll_offset
            .min(row_count.saturating_sub(self.max_visible));
    }

    fn scroll_into_view(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + self.max_visible {
            self.scroll_offset = index + 1 - self.max_visible;
        }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
