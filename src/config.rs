mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::{ApiConfig, CacheConfig, CompletionConfig, Config, StaleResponses};

use crate::error::ConfigError;

pub const CONFIG_DIR: &str = "pathcomplete";
const CONFIG_FILE: &str = "config.toml";
const CACHE_FILE: &str = "paths.toml";

/// `~/.config/pathcomplete/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Default location of the persisted field values
pub fn default_cache_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CACHE_FILE))
}

/// Load the config from the default location.
///
/// A missing file yields the defaults. A present but malformed file is an error
/// so the user learns about the typo instead of silently running on defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) => load_config_from_path(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    parse_config_toml(&contents)
}

pub fn parse_config_toml(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str::<Config>(content)?)
}

impl Config {
    /// Cache file location: explicit override, else the default under the config dir
    pub fn cache_path(&self) -> Option<PathBuf> {
        self.cache.path.clone().or_else(default_cache_path)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
