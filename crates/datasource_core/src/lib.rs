//! Core data-access logic for the datasource workspace.
//! Owns the record model, both storage backends and the runtime selector
//! that decides which backend a process uses.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod select;
pub mod service;

pub use config::DataSourceConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{Record, RecordId, RecordValidationError};
pub use repo::database_repo::DatabaseRepository;
pub use repo::filesystem_repo::FilesystemRepository;
pub use repo::{RecordRepository, RepoError, RepoResult};
pub use select::{
    active_repository, init_repository, load_repository, select_data_source, DataSourceKind,
    SelectedRepository,
};
pub use service::record_service::RecordService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
