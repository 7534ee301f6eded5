//! Record model shared by every storage backend.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Backends persist the same shape; only the medium differs.

pub mod record;
