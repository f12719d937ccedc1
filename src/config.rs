//! Configuration file parser for ~/.config/feedfinder/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys do not fail deserialization (`deny_unknown_fields` is off),
//! but each one is logged as a warning since it is most likely a typo.
use crate::feed::{
    FinderOptions, DEFAULT_GUESS_PATHS, DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_MAX_RESPONSE_BYTES,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Discovery configuration as written in the TOML file.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run every discovery stage instead of stopping at the first hit.
    pub check_all: bool,

    /// User agent override. Unset sends `feedfinder/<version>`.
    pub user_agent: Option<String>,

    /// Per-fetch timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,

    /// Filenames tried against the seed URL when the page links to nothing.
    pub guess_paths: Vec<String>,

    /// Upper bound on concurrent fetches within one stage.
    pub max_concurrent_fetches: usize,

    /// Response size cap per fetch, in bytes.
    pub max_response_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_all: false,
            user_agent: None,
            timeout_secs: None,
            guess_paths: DEFAULT_GUESS_PATHS.iter().map(|p| (*p).to_owned()).collect(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 6] = [
        "check_all",
        "user_agent",
        "timeout_secs",
        "guess_paths",
        "max_concurrent_fetches",
        "max_response_bytes",
    ];

    /// Default config location: `$HOME/.config/feedfinder/config.toml`.
    ///
    /// Returns `None` when `HOME` is not set.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("feedfinder")
                .join("config.toml"),
        )
    }

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted and logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse the TOML content first as a raw table to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            check_all = config.check_all,
            guess_paths = config.guess_paths.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Converts the file configuration into discovery options.
    pub fn into_options(self) -> FinderOptions {
        FinderOptions {
            check_all: self.check_all,
            user_agent: self.user_agent,
            timeout: self.timeout_secs.map(Duration::from_secs),
            guess_paths: self.guess_paths,
            max_concurrent_fetches: self.max_concurrent_fetches,
            max_response_bytes: self.max_response_bytes,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
