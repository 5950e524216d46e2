//! Error types for the storage layer.

use thiserror::Error;

use crate::types::ReportStatus;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record was not found.
    #[error("record not found")]
    NotFound,

    /// A conditional status update found the record in a different status
    /// than the caller expected. Carries the status actually persisted so
    /// the caller can re-validate and retry.
    #[error("report status changed concurrently (now {actual:?})")]
    StatusConflict {
        /// The status the record held at update time.
        actual: ReportStatus,
    },

    /// The reference counter transaction could not be committed.
    ///
    /// No ID was issued and the counter was not mutated; the whole
    /// allocation is safe to retry. Duplicate issuance is never an
    /// acceptable degraded mode, so a failed commit always surfaces here
    /// rather than falling back to a non-transactional write.
    #[error("reference allocation failed: {0}")]
    AllocationFailed(String),

    /// A persisted counter record holds something other than a u64.
    #[error("corrupt counter record: {0}")]
    CorruptCounter(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
