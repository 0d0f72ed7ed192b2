//! Runtime configuration.
//!
//! # Responsibility
//! - Describe storage location, logging and integration settings.
//! - Load them from JSON, filling every omitted field with its default.
//!
//! # Invariants
//! - `remote.max_results` is always within `1..=MAX_UPCOMING` after load.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::default_log_level;
use crate::remote::google::GOOGLE_CALENDAR_API_BASE;
use crate::remote::MAX_UPCOMING;
use crate::service::drag_bridge::DropPolicy;
use rusqlite::Connection;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// External calendar settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub calendar_id: String,
    pub max_results: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: GOOGLE_CALENDAR_API_BASE.to_string(),
            calendar_id: "primary".to_string(),
            max_results: MAX_UPCOMING,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// SQLite file holding the key-value store; in-memory when absent.
    pub storage_path: Option<PathBuf>,
    /// Falls back to `default_log_level()`.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; logging stays off when
    /// absent.
    pub log_dir: Option<PathBuf>,
    pub drop_policy: DropPolicy,
    pub remote: RemoteConfig,
}

impl PlannerConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(text)?;
        config.normalize();
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or_else(|| default_log_level())
    }

    /// Opens the configured key-value database.
    pub fn open_storage(&self) -> DbResult<Connection> {
        match &self.storage_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }

    fn normalize(&mut self) {
        self.remote.max_results = self.remote.max_results.clamp(1, MAX_UPCOMING);
    }
}
