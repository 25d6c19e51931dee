// Configuration type definitions

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_SUGGEST_DEBOUNCE_MS: u64 = 200;
pub const DEFAULT_VALIDATE_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_PAIR_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_MAX_VISIBLE_ROWS: usize = 8;

/// What to do with a response that arrives after a newer request was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StaleResponses {
    /// Apply every response in arrival order (last write wins)
    #[default]
    Apply,
    /// Drop responses older than the newest issued request
    Discard,
}

/// Path API connection section
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Completion engine tuning section
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_separator")]
    pub separator: char,
    #[serde(default = "default_suggest_debounce_ms")]
    pub suggest_debounce_ms: u64,
    #[serde(default = "default_validate_debounce_ms")]
    pub validate_debounce_ms: u64,
    #[serde(default = "default_pair_debounce_ms")]
    pub pair_debounce_ms: u64,
    #[serde(default = "default_max_visible_rows")]
    pub max_visible_rows: usize,
    #[serde(default)]
    pub stale_responses: StaleResponses,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        CompletionConfig {
            separator: default_separator(),
            suggest_debounce_ms: DEFAULT_SUGGEST_DEBOUNCE_MS,
            validate_debounce_ms: DEFAULT_VALIDATE_DEBOUNCE_MS,
            pair_debounce_ms: DEFAULT_PAIR_DEBOUNCE_MS,
            max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
            stale_responses: StaleResponses::Apply,
        }
    }
}

/// Persistence cache section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CacheConfig {
    /// Override for the cache file location
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_separator() -> char {
    '/'
}

fn default_suggest_debounce_ms() -> u64 {
    DEFAULT_SUGGEST_DEBOUNCE_MS
}

fn default_validate_debounce_ms() -> u64 {
    DEFAULT_VALIDATE_DEBOUNCE_MS
}

fn default_pair_debounce_ms() -> u64 {
    DEFAULT_PAIR_DEBOUNCE_MS
}

fn default_max_visible_rows() -> usize {
    DEFAULT_MAX_VISIBLE_ROWS
}
