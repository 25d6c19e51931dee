use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::PathField;
use crate::path::with_trailing_separator;

/// Whether the field used a key or left it for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Ignored,
}

impl KeyOutcome {
    pub fn is_consumed(self) -> bool {
        self == KeyOutcome::Consumed
    }
}

impl PathField {
    /// Navigation keys for the dropdown and the ghost completion.
    ///
    /// Text editing keys are the host's business; it reports the resulting
    /// value through `input`. Keys the field doesn't act on come back as
    /// `Ignored` so the host can run its own default (Escape closing a
    /// sidebar, Enter submitting a form, ...).
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> KeyOutcome {
        if !self.mounted || !self.focused {
            return KeyOutcome::Ignored;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return KeyOutcome::Ignored;
        }

        match key.code {
            KeyCode::Down if !self.state.filtered_suggestions.is_empty() => {
                self.selection
                    .select_next(self.state.filtered_suggestions.len());
                KeyOutcome::Consumed
            }
            KeyCode::Up if !self.state.filtered_suggestions.is_empty() => {
                self.selection
                    .select_previous(self.state.filtered_suggestions.len());
                KeyOutcome::Consumed
            }
            KeyCode::Enter => {
                let selected = self
                    .selection
                    .selected()
                    .filter(|_| self.dropdown_visible())
                    .and_then(|i| self.state.filtered_suggestions.get(i).cloned());
                match selected {
                    Some(suggestion) => {
                        self.accept_suggestion(&suggestion, now);
                        KeyOutcome::Consumed
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            KeyCode::Tab => {
                if !self.state.inline_completion.is_empty() {
                    self.accept_inline(now);
                    KeyOutcome::Consumed
                } else if let Some(first) = self.state.filtered_suggestions.first().cloned() {
                    self.accept_suggestion(&first, now);
                    KeyOutcome::Consumed
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyCode::Right if !self.state.inline_completion.is_empty() => {
                self.accept_inline(now);
                KeyOutcome::Consumed
            }
            KeyCode::Esc => {
                if self.dismiss() {
                    KeyOutcome::Consumed
                } else {
                    KeyOutcome::Ignored
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Take a suggestion as the new value and descend into it
    pub(super) fn accept_suggestion(&mut self, suggestion: &str, now: Instant) {
        let value = with_trailing_separator(suggestion, self.options.separator);
        log::debug!("Accepted suggestion {:?}", value);
        self.selection.close();
        self.focused = true;
        self.set_value(value, now);
    }

    /// Append the ghost text to the value
    fn accept_inline(&mut self, now: Instant) {
        let value = format!("{}{}", self.state.raw_value, self.state.inline_completion);
        log::debug!("Accepted inline completion {:?}", value);
        self.selection.close();
        self.set_value(value, now);
    }

    /// Hide the dropdown and the ghost. Returns whether anything was showing.
    pub(super) fn dismiss(&mut self) -> bool {
        let had_something = self.dropdown_visible() || !self.state.inline_completion.is_empty();
        self.selection.close();
        self.ghost_dismissed = true;
        self.state.inline_completion.clear();
        had_something
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod keys_tests;
