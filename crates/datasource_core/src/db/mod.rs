//! SQLite bootstrap for the `mariaDb` data source.
//!
//! The database-backed repository stores rows in a single `records` table
//! (`uuid`, `content`, `created_at`). This module opens the connection and
//! brings that schema up to date before any repository query runs.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A file written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the records database.
#[derive(Debug)]
pub enum DbError {
    /// Driver-level failure, passed through untouched.
    Sqlite(rusqlite::Error),
    /// The file's `records` schema is ahead of this binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "records database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "records schema version {db_version} is newer than this build supports ({latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
