//! Configuration for the roster manager.
//!
//! Maps directly to an optional `roster.toml`. Every field has a default, so
//! a partial file (or none at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Default name of the configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "roster.toml";

/// Top-level roster configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Where and how the roster is persisted.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Activity log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RosterConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `RosterError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| RosterError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, otherwise use defaults.
    ///
    /// A file that exists but cannot be used also falls back to defaults;
    /// the error is handed back so it can be logged once logging is up.
    #[must_use]
    pub fn load_or_default(path: &Path) -> (Self, Option<RosterError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::from_file(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the roster.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Copy an unreadable data file to `<data_file>.bak` before starting empty.
    #[serde(default = "default_true")]
    pub backup_corrupt: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            backup_corrupt: true,
        }
    }
}

/// Activity log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether the activity log is written at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Append-only log file.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_data_file() -> PathBuf { PathBuf::from("heroes.json") }
fn default_log_file() -> PathBuf { PathBuf::from("game_session.log") }
fn default_log_level() -> String { "info".to_string() }

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
