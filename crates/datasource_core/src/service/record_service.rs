//! Record use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Repository errors are returned unchanged.

use crate::model::record::{Record, RecordId};
use crate::repo::{RecordRepository, RepoResult};
use crate::select::DataSourceKind;

/// Use-case service wrapper for record operations.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Tag of the backend serving this service.
    pub fn source_kind(&self) -> DataSourceKind {
        self.repo.kind()
    }

    pub fn list_records(&self) -> RepoResult<Vec<Record>> {
        self.repo.find_all()
    }

    pub fn get_record(&self, id: RecordId) -> RepoResult<Option<Record>> {
        self.repo.find_by_id(id)
    }

    /// Creates a record from `content` and returns its new id.
    pub fn add_record(&self, content: impl Into<String>) -> RepoResult<RecordId> {
        self.repo.insert(&Record::new(content))
    }
}
