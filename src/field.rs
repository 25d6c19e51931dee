//! Path entry field
//!
//! One `PathField` per folder-path input. It owns the field's state, its two
//! debounce timers, and the receiving end of its network responses. The host
//! drives it from its event loop:
//!
//! - `input` on every edit, `handle_key` for navigation keys, the pointer
//!   methods for mouse events
//! - `tick` to fire due debounce timers
//! - `poll_responses` (or `next_response` from async code) to apply results
//!
//! Every method that can change the value takes `now` so timers are driven by
//! the host's clock.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use crate::api::PathApi;
use crate::cache::PathCache;
use crate::completion::SelectionState;
use crate::debouncer::Debouncer;

mod keys;
mod pipeline;
mod pointer;
mod state;

pub use keys::KeyOutcome;
pub use pipeline::FieldResponse;
pub use state::{FieldError, FieldOptions, PathFieldState, Validity};

pub struct PathField {
    options: FieldOptions,
    state: PathFieldState,
    selection: SelectionState,
    focused: bool,
    /// Escape/outside-press hid the ghost; cleared by the next value change or answer
    ghost_dismissed: bool,
    suggest_timer: Debouncer,
    validate_timer: Debouncer,
    api: Arc<dyn PathApi>,
    cache: Option<Arc<dyn PathCache>>,
    runtime: Handle,
    response_tx: UnboundedSender<FieldResponse>,
    response_rx: UnboundedReceiver<FieldResponse>,
    /// Shared with every in-flight task; cancelled on unmount
    cancel_token: CancellationToken,
    mounted: bool,
    next_request_id: u64,
    latest_suggest_id: u64,
    latest_validate_id: u64,
    suggest_in_flight: usize,
    validate_in_flight: usize,
    validity_changed: bool,
}

impl PathField {
    /// Create an unmounted field. Requests are spawned onto `runtime`.
    pub fn new(options: FieldOptions, api: Arc<dyn PathApi>, runtime: Handle) -> Self {
        let (response_tx, response_rx) = unbounded_channel();

        Self {
            selection: SelectionState::new(options.max_visible_rows),
            suggest_timer: Debouncer::new(options.suggest_debounce),
            validate_timer: Debouncer::new(options.validate_debounce),
            options,
            state: PathFieldState::default(),
            focused: false,
            ghost_dismissed: false,
            api,
            cache: None,
            runtime,
            response_tx,
            response_rx,
            cancel_token: CancellationToken::new(),
            mounted: false,
            next_request_id: 0,
            latest_suggest_id: 0,
            latest_validate_id: 0,
            suggest_in_flight: 0,
            validate_in_flight: 0,
            validity_changed: false,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn PathCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Value supplied by the host before mount; takes precedence over the cache
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.state.raw_value = value.into();
        self
    }

    /// Start the field. Seeds an empty value from the cache, then runs both
    /// pipelines for whatever value the field starts with.
    pub fn mount(&mut self, now: Instant) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if self.cancel_token.is_cancelled() {
            self.cancel_token = CancellationToken::new();
        }

        let seeded = if self.state.raw_value.is_empty() {
            self.cached_value()
        } else {
            None
        };

        let value = seeded.unwrap_or_else(|| self.state.raw_value.clone());
        log::debug!(
            "Mounting field {:?} with {:?}",
            self.options.storage_key,
            value
        );
        self.set_value(value, now);
    }

    /// Tear the field down: both timers are cancelled, in-flight requests are
    /// abandoned, and any response that still arrives is ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.suggest_timer.cancel();
        self.validate_timer.cancel();
        self.cancel_token.cancel();
        self.suggest_in_flight = 0;
        self.validate_in_flight = 0;

        // Tasks that already finished hold the old sender; their sends now fail
        let (response_tx, response_rx) = unbounded_channel();
        self.response_tx = response_tx;
        self.response_rx = response_rx;
        log::debug!("Unmounted field {:?}", self.options.storage_key);
    }

    fn cached_value(&self) -> Option<String> {
        let key = self.options.storage_key.as_deref()?;
        let cache = self.cache.as_ref()?;
        cache.get(key).filter(|value| !value.is_empty())
    }

    fn persist(&self) {
        if self.state.raw_value.is_empty() {
            return;
        }
        if let (Some(key), Some(cache)) = (self.options.storage_key.as_deref(), &self.cache) {
            cache.set(key, &self.state.raw_value);
        }
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn state(&self) -> &PathFieldState {
        &self.state
    }

    pub fn raw_value(&self) -> &str {
        &self.state.raw_value
    }

    pub fn suggestions(&self) -> &[String] {
        &self.state.suggestions
    }

    pub fn filtered_suggestions(&self) -> &[String] {
        &self.state.filtered_suggestions
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn inline_completion(&self) -> &str {
        &self.state.inline_completion
    }

    pub fn validity(&self) -> &Validity {
        &self.state.validity
    }

    pub fn is_valid(&self) -> bool {
        self.state.validity.is_valid
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.state.validity.error.as_ref()
    }

    pub fn is_validating(&self) -> bool {
        self.validate_in_flight > 0
    }

    pub fn is_fetching(&self) -> bool {
        self.suggest_in_flight > 0
    }

    pub fn has_in_flight(&self) -> bool {
        self.is_fetching() || self.is_validating()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn dropdown_visible(&self) -> bool {
        self.selection.is_open() && !self.state.filtered_suggestions.is_empty()
    }

    /// Ghost text is drawn only while the dropdown is hidden
    pub fn ghost_visible(&self) -> bool {
        !self.state.inline_completion.is_empty() && !self.dropdown_visible()
    }

    /// Rows currently scrolled into view, with the index of the first one
    pub fn visible_rows(&self) -> (usize, &[String]) {
        let rows = &self.state.filtered_suggestions;
        let start = self.selection.scroll_offset().min(rows.len());
        let end = (start + self.selection.max_visible()).min(rows.len());
        (start, &rows[start..end])
    }

    /// Validity, once per change. Hosts use it the way a form uses a
    /// validation-changed callback.
    pub fn take_validity_change(&mut self) -> Option<Validity> {
        if std::mem::take(&mut self.validity_changed) {
            Some(self.state.validity.clone())
        } else {
            None
        }
    }

    /// Time until the earlier of the two debounce deadlines
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        match (
            self.suggest_timer.remaining(now),
            self.validate_timer.remaining(now),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl Drop for PathField {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod field_tests;
