use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lint::eslint::DEFAULT_ESLINT;
use crate::lint::marks::DEFAULT_MATE;

// =============================================================================
// Defaults
// =============================================================================

/// Version of the bundle the page belongs to
pub const DEFAULT_CURRENT_VERSION: &str = "3.0.2";

/// Where the latest published version is announced
pub const DEFAULT_LATEST_URL: &str =
    "https://raw.githubusercontent.com/natesilva/javascript-eslint.tmbundle/master/latest.json";

/// Timeout for the latest.json fetch in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Page configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub current_version: String,
    pub update: UpdateConfig,
    pub lint: LintConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            current_version: DEFAULT_CURRENT_VERSION.to_string(),
            update: UpdateConfig::default(),
            lint: LintConfig::default(),
        }
    }
}

/// Update-check configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateConfig {
    pub latest_url: String,
    /// Fetch timeout in milliseconds
    pub timeout: u64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            latest_url: DEFAULT_LATEST_URL.to_string(),
            timeout: FETCH_TIMEOUT_MS,
        }
    }
}

/// Tools used around an ESLint run
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LintConfig {
    /// ESLint executable
    pub eslint: String,
    /// Editor command that sets gutter marks
    pub mate: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            eslint: DEFAULT_ESLINT.to_string(),
            mate: DEFAULT_MATE.to_string(),
        }
    }
}

impl PageConfig {
    /// Load a JSON config file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Returns the path to the data directory for results-page.
/// Uses $XDG_DATA_HOME/results-page if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/results-page,
/// or ./results-page if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("results-page.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("results-page")
}
