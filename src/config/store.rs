//! Settings persisted as JSON in the per-user config directory.
//!
//! Resolution order (lowest to highest):
//! 1. Compiled-in defaults
//! 2. `{config_dir}/redline/config.json`
//! 3. `REDLINE_API_URL` / `REDLINE_API_KEY` environment variables
//!
//! Loading is total: a missing, empty, or malformed file falls back to
//! defaults instead of failing. Settings are read once at startup and
//! passed into components by value; there is no process-wide singleton
//! and no hot-reload.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors while saving settings. Loading never fails.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the config directory")]
    NoConfigDir,

    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Client-facing settings: where the review service lives and the
/// optional bearer credential to present.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            api_key: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Settings {
    /// Load settings from the default config file and environment.
    pub fn load(env: &Env) -> Self {
        let mut settings = match config_path() {
            Some(path) => Self::load_file(&path),
            None => Self::default(),
        };
        settings.apply_env(env);
        settings
    }

    /// Read a settings file, falling back to defaults when the file is
    /// missing or malformed.
    fn load_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Apply environment variable overrides.
    fn apply_env(&mut self, env: &Env) {
        if let Some(url) = env.get(constants::ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(key) = env.get(constants::ENV_API_KEY) {
            self.api_key = Some(key);
        }
    }

    /// Write settings to the default config file, creating the
    /// directory if needed. Returns the path written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::Write {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Default config file path: `{config_dir}/redline/config.json`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join(constants::CONFIG_FILENAME))
}
