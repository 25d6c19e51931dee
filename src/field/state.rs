use std::time::Duration;

use thiserror::Error;

use crate::config::{CompletionConfig, StaleResponses};

/// Field-level validation problem shown under the input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The server looked at the path and rejected it (not found, unreadable, ...)
    #[error("{0}")]
    Rejected(String),

    /// The validation call itself failed
    #[error("Failed to validate path")]
    Unreachable,
}

/// Outcome of the most recent validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validity {
    pub is_valid: bool,
    pub error: Option<FieldError>,
    pub normalized_path: Option<String>,
}

impl Validity {
    /// Blank field: not valid, but not an error either
    pub fn unfilled() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            is_valid: false,
            error: Some(FieldError::Unreachable),
            normalized_path: None,
        }
    }
}

/// Observable per-field state
#[derive(Debug, Clone, Default)]
pub struct PathFieldState {
    pub raw_value: String,
    /// Last applied server answer
    pub suggestions: Vec<String>,
    /// `suggestions` re-filtered against `raw_value`
    pub filtered_suggestions: Vec<String>,
    /// Ghost text; empty or ending with the separator
    pub inline_completion: String,
    pub validity: Validity,
}

/// Per-field settings
#[derive(Debug, Clone)]
pub struct FieldOptions {
    /// Persistence key; None disables the cache for this field
    pub storage_key: Option<String>,
    pub separator: char,
    pub suggest_debounce: Duration,
    pub validate_debounce: Duration,
    pub max_visible_rows: usize,
    pub stale_responses: StaleResponses,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self::from_config(&CompletionConfig::default())
    }
}

impl FieldOptions {
    pub fn from_config(config: &CompletionConfig) -> Self {
        Self {
            storage_key: None,
            separator: config.separator,
            suggest_debounce: Duration::from_millis(config.suggest_debounce_ms),
            validate_debounce: Duration::from_millis(config.validate_debounce_ms),
            max_visible_rows: config.max_visible_rows,
            stale_responses: config.stale_responses,
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    pub fn with_stale_responses(mut self, policy: StaleResponses) -> Self {
        self.stale_responses = policy;
        self
    }
}
