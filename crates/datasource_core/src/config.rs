//! Data source configuration.
//!
//! Values are read once and passed explicitly into the selector, so callers
//! and tests never depend on ambient process state after startup.

use std::path::PathBuf;

pub const DB_TYPE_KEY: &str = "DB_TYPE";
pub const DB_PATH_KEY: &str = "DB_PATH";
pub const DATA_DIR_KEY: &str = "DATA_DIR";

const DEFAULT_DB_PATH: &str = "datasource.db";
const DEFAULT_DATA_DIR: &str = "data";

/// Settings consumed by repository selection and construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceConfig {
    /// Raw `DB_TYPE` value, kept verbatim. `None` when unset.
    pub db_type: Option<String>,
    /// SQLite file used by the database-backed repository.
    pub db_path: PathBuf,
    /// Directory used by the filesystem-backed repository.
    pub data_dir: PathBuf,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            db_type: None,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl DataSourceConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Variables that are unset or not valid UTF-8 count as absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank path values fall back to defaults; `DB_TYPE` is not normalized.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path_or = |key: &str, fallback: PathBuf| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(fallback)
        };

        Self {
            db_type: lookup(DB_TYPE_KEY),
            db_path: path_or(DB_PATH_KEY, defaults.db_path),
            data_dir: path_or(DATA_DIR_KEY, defaults.data_dir),
        }
    }

    pub fn with_db_type(mut self, db_type: impl Into<String>) -> Self {
        self.db_type = Some(db_type.into());
        self
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}
