//! Configuration management.
//!
//! Loads configuration from ${JESTER_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

pub mod paths {
    //! Path resolution for configuration and data directories.
    //!
    //! JESTER_HOME resolution order:
    //! 1. JESTER_HOME environment variable (if set)
    //! 2. ~/.config/jester (default)

    use std::path::PathBuf;

    /// Returns the jester home directory.
    ///
    /// Checks JESTER_HOME env var first, falls back to ~/.config/jester
    pub fn jester_home() -> PathBuf {
        if let Ok(home) = std::env::var("JESTER_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("jester"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        jester_home().join("config.toml")
    }

    /// Returns the path to the stored-token file.
    pub fn token_path() -> PathBuf {
        jester_home().join("auth.json")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the account service
    pub base_url: String,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
