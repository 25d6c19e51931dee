use thiserror::Error;

/// Errors from calls to the path API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, DNS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Response body was not the expected JSON shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Api {
                code: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Errors from the file-backed path cache
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize cache: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid cache file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors from loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
