//! Use-case services over the repository contract.
//!
//! Services stay storage-agnostic: they only see `RecordRepository`.

pub mod record_service;
