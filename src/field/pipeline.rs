//! Suggestion and validation pipelines
//!
//! Both pipelines start from the same value change but never wait on each
//! other. Requests run as tasks on the host's runtime and report back through
//! the field's channel; nothing here blocks.

use std::time::Instant;

use super::{FieldError, PathField, Validity};
use crate::api::ValidationResult;
use crate::completion::{filter_suggestions, inline_completion};
use crate::config::StaleResponses;
use crate::error::ApiError;
use crate::path::ends_with_separator;

/// A finished remote call, tagged with the id it was issued under
#[derive(Debug)]
pub enum FieldResponse {
    Suggestions {
        request_id: u64,
        query: String,
        result: Result<Vec<String>, ApiError>,
    },
    Validation {
        request_id: u64,
        path: String,
        result: Result<ValidationResult, ApiError>,
    },
}

impl PathField {
    /// Keystroke entry point: the host's text widget produced a new value
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        if !self.mounted {
            return;
        }
        self.selection.clear_selection();
        self.set_value(value.into(), now);
    }

    /// Replace the value and run everything that observes it
    pub(super) fn set_value(&mut self, value: String, now: Instant) {
        self.state.raw_value = value;
        self.ghost_dismissed = false;
        self.persist();
        self.refresh_derived();
        self.schedule_suggestions(now);
        self.schedule_validation(now);
    }

    /// Fetch suggestions for the current value right away, skipping the debounce
    pub fn trigger_suggestion_fetch(&mut self) {
        if !self.mounted {
            return;
        }
        self.suggest_timer.cancel();
        if self.state.raw_value.is_empty() {
            self.clear_suggestions();
        } else {
            self.dispatch_suggest();
        }
    }

    /// Fire whichever debounce timers have run out
    pub fn tick(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        if self.suggest_timer.fire_if_due(now) {
            self.dispatch_suggest();
        }
        if self.validate_timer.fire_if_due(now) {
            self.dispatch_validate();
        }
    }

    /// Apply every response that has arrived. Returns how many were applied.
    pub fn poll_responses(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        while self.mounted {
            match self.response_rx.try_recv() {
                Ok(response) => {
                    self.apply_response(response, now);
                    applied += 1;
                }
                Err(_) => break,
            }
        }
        applied
    }

    /// Wait for the next response and apply it.
    ///
    /// Returns false without waiting when the field is unmounted. Only await
    /// this while `has_in_flight()` is true; otherwise nothing will arrive.
    pub async fn next_response(&mut self, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        match self.response_rx.recv().await {
            Some(response) => {
                self.apply_response(response, now);
                true
            }
            None => false,
        }
    }

    fn schedule_suggestions(&mut self, now: Instant) {
        if self.state.raw_value.is_empty() {
            self.suggest_timer.cancel();
            self.clear_suggestions();
            return;
        }

        if ends_with_separator(&self.state.raw_value, self.options.separator) {
            // A new directory level was just opened
            self.suggest_timer.cancel();
            self.dispatch_suggest();
        } else {
            self.suggest_timer.schedule(now);
        }
    }

    fn schedule_validation(&mut self, now: Instant) {
        if self.state.raw_value.trim().is_empty() {
            self.validate_timer.cancel();
            self.set_validity(Validity::unfilled());
            return;
        }
        self.validate_timer.schedule(now);
    }

    fn issue_request_id(&mut self) -> u64 {
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.next_request_id
    }

    fn dispatch_suggest(&mut self) {
        let request_id = self.issue_request_id();
        self.latest_suggest_id = request_id;
        self.suggest_in_flight += 1;

        let query = self.state.raw_value.clone();
        log::debug!("Suggest request {} for {:?}", request_id, query);

        let api = self.api.clone();
        let tx = self.response_tx.clone();
        let cancel_token = self.cancel_token.clone();
        self.runtime.spawn(async move {
            let result = tokio::select! {
                _ = cancel_token.cancelled() => return,
                result = api.suggest(&query) => result,
            };
            let _ = tx.send(FieldResponse::Suggestions {
                request_id,
                query,
                result,
            });
        });
    }

    fn dispatch_validate(&mut self) {
        let request_id = self.issue_request_id();
        self.latest_validate_id = request_id;
        self.validate_in_flight += 1;

        let path = self.state.raw_value.clone();
        log::debug!("Validate request {} for {:?}", request_id, path);

        let api = self.api.clone();
        let tx = self.response_tx.clone();
        let cancel_token = self.cancel_token.clone();
        self.runtime.spawn(async move {
            let result = tokio::select! {
                _ = cancel_token.cancelled() => return,
                result = api.validate(&path) => result,
            };
            let _ = tx.send(FieldResponse::Validation {
                request_id,
                path,
                result,
            });
        });
    }

    fn is_stale(&self, request_id: u64, latest: u64) -> bool {
        self.options.stale_responses == StaleResponses::Discard && request_id < latest
    }

    fn apply_response(&mut self, response: FieldResponse, now: Instant) {
        match response {
            FieldResponse::Suggestions {
                request_id,
                query,
                result,
            } => {
                self.suggest_in_flight = self.suggest_in_flight.saturating_sub(1);
                if self.is_stale(request_id, self.latest_suggest_id) {
                    log::debug!("Dropping stale suggestions {} for {:?}", request_id, query);
                    return;
                }
                self.apply_suggestions(&query, result);
            }
            FieldResponse::Validation {
                request_id,
                path,
                result,
            } => {
                self.validate_in_flight = self.validate_in_flight.saturating_sub(1);
                if self.is_stale(request_id, self.latest_validate_id) {
                    log::debug!("Dropping stale validation {} for {:?}", request_id, path);
                    return;
                }
                self.apply_validation(&path, result, now);
            }
        }
    }

    fn apply_suggestions(&mut self, query: &str, result: Result<Vec<String>, ApiError>) {
        if self.state.raw_value.is_empty() {
            // The field was cleared while the request was out
            return;
        }

        match result {
            Ok(suggestions) => {
                log::debug!("{} suggestions for {:?}", suggestions.len(), query);
                self.state.suggestions = suggestions;
                self.ghost_dismissed = false;
                self.refresh_derived();
                if self.state.filtered_suggestions.is_empty() {
                    self.selection.close();
                } else {
                    self.selection.open();
                }
            }
            Err(e) => {
                log::debug!("Suggest failed for {:?}: {}", query, e);
                self.clear_suggestions();
            }
        }
    }

    fn apply_validation(
        &mut self,
        path: &str,
        result: Result<ValidationResult, ApiError>,
        now: Instant,
    ) {
        if self.state.raw_value.trim().is_empty() {
            return;
        }

        match result {
            Ok(result) => {
                let normalized = result
                    .normalized_path
                    .clone()
                    .filter(|normalized| !normalized.is_empty());

                self.set_validity(Validity {
                    is_valid: result.valid,
                    error: result.error.map(FieldError::Rejected),
                    normalized_path: normalized.clone(),
                });

                // Only rewrite the text that was validated, never newer typing
                if let Some(normalized) = normalized
                    && normalized != path
                    && self.state.raw_value == path
                {
                    log::debug!("Normalizing {:?} to {:?}", self.state.raw_value, normalized);
                    self.selection.clear_selection();
                    self.set_value(normalized, now);
                }
            }
            Err(e) => {
                log::debug!("Validate failed for {:?}: {}", path, e);
                self.set_validity(Validity::unreachable());
            }
        }
    }

    fn set_validity(&mut self, validity: Validity) {
        if self.state.validity != validity {
            self.state.validity = validity;
            self.validity_changed = true;
        }
    }

    fn clear_suggestions(&mut self) {
        self.state.suggestions.clear();
        self.refresh_derived();
    }

    /// Recompute the filtered rows and the ghost from the value and the last answer
    pub(super) fn refresh_derived(&mut self) {
        let separator = self.options.separator;
        self.state.filtered_suggestions =
            filter_suggestions(&self.state.raw_value, &self.state.suggestions, separator);
        self.state.inline_completion = if self.ghost_dismissed {
            String::new()
        } else {
            inline_completion(
                &self.state.raw_value,
                &self.state.filtered_suggestions,
                separator,
            )
        };

        if self.state.filtered_suggestions.is_empty() {
            self.selection.close();
        } else {
            self.selection
                .clamp_to(self.state.filtered_suggestions.len());
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;
