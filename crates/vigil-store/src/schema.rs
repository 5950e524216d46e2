//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Per-category reference counters, keyed by category name.
    pub const COUNTERS: &str = "counters";

    /// Primary report records, keyed by `report_id`.
    pub const REPORTS: &str = "reports";

    /// Index: reports by category, keyed by `category || report_id`.
    pub const REPORTS_BY_CATEGORY: &str = "reports_by_category";

    /// Index: reports by submitting user, keyed by `user_id || report_id`.
    pub const REPORTS_BY_USER: &str = "reports_by_user";

    /// Index: reports by status, keyed by `status || report_id`.
    pub const REPORTS_BY_STATUS: &str = "reports_by_status";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::COUNTERS,
        cf::REPORTS,
        cf::REPORTS_BY_CATEGORY,
        cf::REPORTS_BY_USER,
        cf::REPORTS_BY_STATUS,
    ]
}
