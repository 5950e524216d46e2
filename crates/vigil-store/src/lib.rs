//! `RocksDB` storage layer for vigil.
//!
//! This crate provides persistent storage for reports and the per-category
//! reference counters, using `RocksDB` with column families for efficient
//! indexing. The counter increment runs inside a `RocksDB` transaction —
//! this is the single serialization point of the whole write path, and the
//! only part of the system with a real correctness contract: no two
//! allocations may ever return the same reference, even under concurrent
//! submission from independent processes.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `counters`: per-category reference counters, keyed by category name
//! - `reports`: primary report records, keyed by `report_id`
//! - `reports_by_category`: index for listing reports by category
//! - `reports_by_user`: index for listing reports by submitting user
//! - `reports_by_status`: index for listing reports by workflow status
//!
//! # Example
//!
//! ```no_run
//! use vigil_store::{ReferenceAllocator, RocksStore, Store};
//! use vigil_core::Category;
//!
//! let store = RocksStore::open("/tmp/vigil-db").unwrap();
//!
//! // Allocate the next incident reference
//! let reference = store.allocate_reference(Category::Incident).unwrap();
//! println!("assigned {reference}");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;
pub mod types;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;
pub use types::{Report, ReportStatus};

use vigil_core::{Category, ReferenceId, ReportId, UserId};

/// The reference-ID allocator: the one narrow interface form-submission
/// handlers depend on.
///
/// Given a category, [`allocate_reference`](Self::allocate_reference)
/// atomically produces the next sequence number and returns the formatted
/// reference, such that no two calls — including concurrent calls from
/// independent processes — ever return the same reference for the same
/// category. All state lives in the persisted counter record; the allocator
/// itself is stateless between calls.
pub trait ReferenceAllocator: Send + Sync {
    /// Atomically allocate the next reference for a category.
    ///
    /// Sequence numbers for one category are issued in strictly increasing
    /// order with no gaps between successful allocations. Note that a lower
    /// reference does not imply the associated document was persisted
    /// earlier in wall-clock terms; allocation and document-persist are
    /// separate steps and two callers' sequences can interleave.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AllocationFailed` if the transaction cannot be
    /// committed. No ID is issued and the counter is untouched in that
    /// case, so the whole call is safe to retry.
    fn allocate_reference(&self, category: Category) -> Result<ReferenceId>;

    /// Non-transactional read of a category's counter, for diagnostics and
    /// admin display.
    ///
    /// Returns 0 if the counter record does not yet exist. The value may be
    /// stale immediately after return; no uniqueness guarantee is implied.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn reference_count(&self, category: Category) -> Result<u64>;

    /// Administrative override: unconditionally overwrite the counter.
    ///
    /// Subsequent allocations resume from `value + 1`. Not coordinated with
    /// concurrent allocations — the operator must ensure none are in
    /// flight. Setting `value` below a previously reached high-water mark
    /// re-issues references; that is the operator's accepted risk, not a
    /// condition this layer detects.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn reset_reference_count(&self, category: Category, value: u64) -> Result<()>;
}

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations while keeping callers off the `RocksDB` API.
pub trait Store: ReferenceAllocator {
    /// Insert or update a report record.
    ///
    /// This also maintains the category, user, and status indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_report(&self, report: &Report) -> Result<()>;

    /// Get a report by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_report(&self, report_id: &ReportId) -> Result<Option<Report>>;

    /// Conditionally move a report to a new status.
    ///
    /// The update runs as a single transaction holding a row lock on the
    /// report record: the stored status is compared against `expected`, and
    /// the status change plus the status-index rewrite either land together
    /// or not at all. Returns the updated report on success.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the report doesn't exist, and
    /// `StoreError::StatusConflict` if the stored status is not `expected` —
    /// the caller sees the status actually persisted and can re-validate.
    fn update_report_status(
        &self,
        report_id: &ReportId,
        expected: ReportStatus,
        to: ReportStatus,
    ) -> Result<Report>;

    /// Delete a report by ID.
    ///
    /// This also removes the report from all indexes. The allocated
    /// reference is not returned to the counter.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the report doesn't exist.
    fn delete_report(&self, report_id: &ReportId) -> Result<()>;

    /// List all reports in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_reports_by_category(&self, category: Category) -> Result<Vec<Report>>;

    /// List all reports submitted by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_reports_by_user(&self, user_id: &UserId) -> Result<Vec<Report>>;

    /// List all reports with a given workflow status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_reports_by_status(&self, status: ReportStatus) -> Result<Vec<Report>>;

    /// Count reports in a category.
    ///
    /// This is more efficient than listing when you only need the count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_reports_by_category(&self, category: Category) -> Result<u64>;

    /// Count reports with a given workflow status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_reports_by_status(&self, status: ReportStatus) -> Result<u64>;

    /// List all reports in the database.
    ///
    /// Use with caution in production; prefer filtered queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_all_reports(&self) -> Result<Vec<Report>>;
}
