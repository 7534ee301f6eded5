//! Repository contract and its storage backends.
//!
//! # Responsibility
//! - Define the record-retrieval capability every backend exposes.
//! - Keep SQL and file layout details behind that capability.
//!
//! # Invariants
//! - Writes call `Record::validate()` before touching storage.
//! - Reads reject invalid persisted state instead of masking it.
//! - `find_all` orders by `created_at ASC, uuid ASC` in every backend.

use crate::db::DbError;
use crate::model::record::{Record, RecordId, RecordValidationError};
use crate::select::DataSourceKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod database_repo;
pub mod filesystem_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by both backends.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Duplicate(RecordId),
    InvalidData(String),
    LockPoisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::Duplicate(id) => write!(f, "record already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::LockPoisoned => write!(f, "repository lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Duplicate(_) | Self::InvalidData(_) | Self::LockPoisoned => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Uniform record-retrieval capability, independent of backing storage.
pub trait RecordRepository: Send + Sync {
    /// Tag identifying the backend kind.
    fn kind(&self) -> DataSourceKind;

    /// Returns every stored record.
    fn find_all(&self) -> RepoResult<Vec<Record>>;

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Record>>;

    /// Persists a new record.
    ///
    /// # Errors
    /// - `RepoError::Validation` when the record is invalid.
    /// - `RepoError::Duplicate` when the id is already stored.
    fn insert(&self, record: &Record) -> RepoResult<RecordId>;

    fn count(&self) -> RepoResult<usize> {
        Ok(self.find_all()?.len())
    }
}

/// Lets services borrow a repository, such as the process-wide selection.
impl<R: RecordRepository> RecordRepository for &R {
    fn kind(&self) -> DataSourceKind {
        (**self).kind()
    }

    fn find_all(&self) -> RepoResult<Vec<Record>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Record>> {
        (**self).find_by_id(id)
    }

    fn insert(&self, record: &Record) -> RepoResult<RecordId> {
        (**self).insert(record)
    }

    fn count(&self) -> RepoResult<usize> {
        (**self).count()
    }
}
