//! Path API abstraction
//!
//! Defines the remote contract the completion engine talks to and the wire
//! types for each endpoint. The engine only ever sees the `PathApi` trait so
//! hosts and tests can substitute their own backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

mod http;

pub use http::HttpPathApi;

/// `GET /api/paths/suggest` response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct SuggestResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// `POST /api/paths/validate` request body
#[derive(Debug, Clone, Serialize)]
pub struct ValidateRequest<'a> {
    pub path: &'a str,
}

/// `POST /api/paths/validate` response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub normalized_path: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
            normalized_path: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            normalized_path: None,
        }
    }

    pub fn with_normalized_path(mut self, path: impl Into<String>) -> Self {
        self.normalized_path = Some(path.into());
        self
    }
}

/// `POST /api/paths/validate-pair` request body
#[derive(Debug, Clone, Serialize)]
pub struct ValidatePairRequest<'a> {
    pub backup_path: &'a str,
    pub sorted_path: &'a str,
}

/// `POST /api/paths/validate-pair` response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PairValidation {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub backup_path: Option<String>,
    #[serde(default)]
    pub sorted_path: Option<String>,
}

/// Remote path service
#[async_trait]
pub trait PathApi: Send + Sync {
    /// Child-directory candidates for the directory implied by `partial`
    async fn suggest(&self, partial: &str) -> Result<Vec<String>, ApiError>;

    /// Existence/accessibility check, possibly normalizing the path
    async fn validate(&self, path: &str) -> Result<ValidationResult, ApiError>;

    /// Cross-field compatibility check for a backup/sorted pair
    async fn validate_pair(
        &self,
        backup_path: &str,
        sorted_path: &str,
    ) -> Result<PairValidation, ApiError>;
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
