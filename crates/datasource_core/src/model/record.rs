//! Record domain model.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another record.
//! - `content` is never blank.
//! - `created_at` is a non-negative Unix epoch in milliseconds.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of a record across both backends.
pub type RecordId = Uuid;

/// Canonical record returned by `find_all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub uuid: RecordId,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Validation failures for record writes and persisted reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyContent,
    NegativeTimestamp,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "record content must not be blank"),
            Self::NegativeTimestamp => write!(f, "record created_at must not be negative"),
        }
    }
}

impl Error for RecordValidationError {}

impl Record {
    /// Creates a record with a generated id, stamped with the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), content, now_epoch_ms())
    }

    /// Creates a record with a caller-provided id and timestamp.
    ///
    /// Does not validate; writes call `validate()` before persisting.
    pub fn with_id(uuid: RecordId, content: impl Into<String>, created_at: i64) -> Self {
        Self {
            uuid,
            content: content.into(),
            created_at,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.content.trim().is_empty() {
            return Err(RecordValidationError::EmptyContent);
        }
        if self.created_at < 0 {
            return Err(RecordValidationError::NegativeTimestamp);
        }
        Ok(())
    }
}

/// Sort key used by every backend: oldest first, ties broken by id.
pub(crate) fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.uuid.cmp(&b.uuid))
    });
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
