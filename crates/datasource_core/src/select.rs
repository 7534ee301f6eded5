//! Runtime data source selection.
//!
//! # Responsibility
//! - Map the configured `DB_TYPE` onto exactly one repository backend.
//! - Emit one diagnostic line naming the chosen backend; backend bootstrap
//!   events stay at debug level so this is the only info-level line.
//! - Hold the process-wide selection once it has been made.
//!
//! # Invariants
//! - Only the exact value `mariaDb` selects the database backend; every other
//!   value, including an absent one, selects the filesystem backend.
//! - Selection itself never fails. Backend construction errors propagate unchanged.
//! - The process-wide selection is made at most once.

use crate::config::DataSourceConfig;
use crate::model::record::{Record, RecordId};
use crate::repo::database_repo::DatabaseRepository;
use crate::repo::filesystem_repo::FilesystemRepository;
use crate::repo::{RecordRepository, RepoResult};
use log::info;
use once_cell::sync::OnceCell;
use std::fmt::{Display, Formatter};

const MARIADB_DB_TYPE: &str = "mariaDb";
const FILESYSTEM_TAG: &str = "filesystem";

static ACTIVE_REPOSITORY: OnceCell<SelectedRepository> = OnceCell::new();

/// Backend kind, also used as the repository `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSourceKind {
    MariaDb,
    Filesystem,
}

impl DataSourceKind {
    /// Resolves a raw `DB_TYPE` value. Unrecognized values fall back to the filesystem.
    pub fn from_db_type(value: Option<&str>) -> Self {
        match value {
            Some(MARIADB_DB_TYPE) => Self::MariaDb,
            _ => Self::Filesystem,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MariaDb => MARIADB_DB_TYPE,
            Self::Filesystem => FILESYSTEM_TAG,
        }
    }

    /// Diagnostic line emitted when this kind is selected.
    pub fn load_message(self) -> &'static str {
        match self {
            Self::MariaDb => "Loading mariaDb data source at runtime",
            Self::Filesystem => "Loading filesystem as data source at runtime",
        }
    }
}

impl Display for DataSourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chooses the backend for `config` and logs the choice.
pub fn select_data_source(config: &DataSourceConfig) -> DataSourceKind {
    let kind = DataSourceKind::from_db_type(config.db_type.as_deref());
    info!("{}", kind.load_message());
    kind
}

/// The chosen backend. Callers use it through `RecordRepository`.
pub enum SelectedRepository {
    Database(DatabaseRepository),
    Filesystem(FilesystemRepository),
}

impl SelectedRepository {
    fn as_repository(&self) -> &dyn RecordRepository {
        match self {
            Self::Database(repo) => repo,
            Self::Filesystem(repo) => repo,
        }
    }
}

impl RecordRepository for SelectedRepository {
    fn kind(&self) -> DataSourceKind {
        self.as_repository().kind()
    }

    fn find_all(&self) -> RepoResult<Vec<Record>> {
        self.as_repository().find_all()
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Record>> {
        self.as_repository().find_by_id(id)
    }

    fn insert(&self, record: &Record) -> RepoResult<RecordId> {
        self.as_repository().insert(record)
    }

    fn count(&self) -> RepoResult<usize> {
        self.as_repository().count()
    }
}

/// Selects a backend for `config` and opens it.
///
/// Every call re-selects; use `init_repository` for the process-wide instance.
pub fn load_repository(config: &DataSourceConfig) -> RepoResult<SelectedRepository> {
    match select_data_source(config) {
        DataSourceKind::MariaDb => Ok(SelectedRepository::Database(DatabaseRepository::open(
            &config.db_path,
        )?)),
        DataSourceKind::Filesystem => Ok(SelectedRepository::Filesystem(
            FilesystemRepository::open(config.data_dir.clone())?,
        )),
    }
}

/// Makes the process-wide selection on first call and returns it.
///
/// Later calls return the existing instance and ignore `config`. A failed
/// first attempt leaves the slot empty so the caller can retry.
pub fn init_repository(config: &DataSourceConfig) -> RepoResult<&'static SelectedRepository> {
    ACTIVE_REPOSITORY.get_or_try_init(|| load_repository(config))
}

/// Returns the process-wide selection, if one has been made.
pub fn active_repository() -> Option<&'static SelectedRepository> {
    ACTIVE_REPOSITORY.get()
}
