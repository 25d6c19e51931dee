use std::time::Instant;

use super::PathField;
use crate::path::ends_with_separator;

impl PathField {
    /// The field gained focus. Opens the dropdown when there is anything to show.
    pub fn focus(&mut self) {
        self.focused = true;
        if !self.state.filtered_suggestions.is_empty()
            || ends_with_separator(&self.state.raw_value, self.options.separator)
        {
            self.selection.open();
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Pointer pressed somewhere outside the field and its dropdown. Hides
    /// the dropdown and the ghost; the value is left alone.
    pub fn press_outside(&mut self) {
        self.dismiss();
    }

    /// Highlight the row under the pointer. Leaving a row keeps the highlight.
    pub fn hover_row(&mut self, index: usize) {
        if self.dropdown_visible() {
            self.selection
                .select_index(index, self.state.filtered_suggestions.len());
        }
    }

    /// Accept the clicked row. Returns false when no such row is shown.
    pub fn click_row(&mut self, index: usize, now: Instant) -> bool {
        if !self.mounted || !self.dropdown_visible() {
            return false;
        }
        match self.state.filtered_suggestions.get(index).cloned() {
            Some(suggestion) => {
                self.accept_suggestion(&suggestion, now);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "pointer_tests.rs"]
mod pointer_tests;
