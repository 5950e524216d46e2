//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the [`Store`]
//! and [`ReferenceAllocator`] traits. The database is opened as a
//! `TransactionDB` so the counter increment can run as a pessimistic
//! single-record transaction: `get_for_update` takes a row lock, concurrent
//! allocators for the same category queue on it, and a commit either lands
//! the whole read-increment-write or nothing. No client-side locking or
//! retry loop is layered on top.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, IteratorMode, MultiThreaded, Options,
    TransactionDB, TransactionDBOptions,
};
use vigil_core::{Category, ReferenceId, ReportId, UserId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::types::{Report, ReportStatus};
use crate::{ReferenceAllocator, Store};

/// How long an allocation waits on another allocator's row lock before the
/// transaction gives up, in milliseconds.
const LOCK_TIMEOUT_MS: i64 = 10_000;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<TransactionDB<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` transaction database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_lock_timeout(path, LOCK_TIMEOUT_MS)
    }

    /// Open with an explicit row-lock timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open_with_lock_timeout<P: AsRef<Path>>(path: P, lock_timeout_ms: i64) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let mut txn_db_opts = TransactionDBOptions::default();
        txn_db_opts.set_txn_lock_timeout(lock_timeout_ms);
        txn_db_opts.set_default_lock_timeout(lock_timeout_ms);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = TransactionDB::open_cf_descriptors(&opts, &txn_db_opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode a persisted counter value (big-endian u64).
    fn decode_counter(raw: &[u8]) -> Result<u64> {
        let bytes: [u8; 8] = raw.try_into().map_err(|_| {
            StoreError::CorruptCounter(format!("expected 8 bytes, got {}", raw.len()))
        })?;
        Ok(u64::from_be_bytes(bytes))
    }
}

impl ReferenceAllocator for RocksStore {
    fn allocate_reference(&self, category: Category) -> Result<ReferenceId> {
        let cf_counters = self.cf(cf::COUNTERS)?;
        let key = keys::counter_key(category);

        let txn = self.db.transaction();

        // Exclusive lock on the counter row; absent record counts as 0.
        let current = txn
            .get_for_update_cf(&cf_counters, &key, true)
            .map_err(|e| StoreError::AllocationFailed(e.to_string()))?
            .as_deref()
            .map(Self::decode_counter)
            .transpose()?
            .unwrap_or(0);

        let next = current + 1;
        txn.put_cf(&cf_counters, &key, next.to_be_bytes())
            .map_err(|e| StoreError::AllocationFailed(e.to_string()))?;
        txn.commit()
            .map_err(|e| StoreError::AllocationFailed(e.to_string()))?;

        let reference = ReferenceId::new(category, next);
        tracing::debug!(category = %category, reference = %reference, "Allocated reference");
        Ok(reference)
    }

    fn reference_count(&self, category: Category) -> Result<u64> {
        let cf_counters = self.cf(cf::COUNTERS)?;
        let key = keys::counter_key(category);

        self.db
            .get_cf(&cf_counters, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .as_deref()
            .map_or(Ok(0), Self::decode_counter)
    }

    fn reset_reference_count(&self, category: Category, value: u64) -> Result<()> {
        let cf_counters = self.cf(cf::COUNTERS)?;
        let key = keys::counter_key(category);

        self.db
            .put_cf(&cf_counters, key, value.to_be_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::warn!(category = %category, value, "Reference counter reset");
        Ok(())
    }
}

impl Store for RocksStore {
    fn put_report(&self, report: &Report) -> Result<()> {
        let cf_reports = self.cf(cf::REPORTS)?;
        let cf_by_category = self.cf(cf::REPORTS_BY_CATEGORY)?;
        let cf_by_user = self.cf(cf::REPORTS_BY_USER)?;
        let cf_by_status = self.cf(cf::REPORTS_BY_STATUS)?;

        let report_key = keys::report_key(&report.report_id);
        let category_key = keys::category_report_key(report.category, &report.report_id);
        let user_key = keys::user_report_key(&report.submitted_by, &report.report_id);
        let status_key = keys::status_report_key(report.status.as_u8(), &report.report_id);
        let value = Self::serialize(report)?;

        let txn = self.db.transaction();

        // Row lock on the report so the old status can't change between the
        // read here and the index rewrite below.
        let old_status = txn
            .get_for_update_cf(&cf_reports, &report_key, true)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize::<Report>(&data))
            .transpose()?
            .map(|r| r.status);

        // Main record
        txn.put_cf(&cf_reports, &report_key, &value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        // Category and user indexes (idempotent)
        txn.put_cf(&cf_by_category, &category_key, [])
            .map_err(|e| StoreError::Database(e.to_string()))?;
        txn.put_cf(&cf_by_user, &user_key, [])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        // Status index, dropping the old entry if the status changed
        if let Some(old) = old_status {
            if old != report.status {
                let old_status_key = keys::status_report_key(old.as_u8(), &report.report_id);
                txn.delete_cf(&cf_by_status, &old_status_key)
                    .map_err(|e| StoreError::Database(e.to_string()))?;
            }
        }
        txn.put_cf(&cf_by_status, &status_key, [])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        txn.commit()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_report(&self, report_id: &ReportId) -> Result<Option<Report>> {
        let cf_reports = self.cf(cf::REPORTS)?;
        let key = keys::report_key(report_id);

        self.db
            .get_cf(&cf_reports, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn update_report_status(
        &self,
        report_id: &ReportId,
        expected: ReportStatus,
        to: ReportStatus,
    ) -> Result<Report> {
        let cf_reports = self.cf(cf::REPORTS)?;
        let cf_by_status = self.cf(cf::REPORTS_BY_STATUS)?;
        let report_key = keys::report_key(report_id);

        let txn = self.db.transaction();

        // Exclusive lock on the report row; the status comparison and the
        // rewrite commit together or not at all.
        let mut report: Report = txn
            .get_for_update_cf(&cf_reports, &report_key, true)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .as_deref()
            .map(Self::deserialize)
            .transpose()?
            .ok_or(StoreError::NotFound)?;

        if report.status != expected {
            return Err(StoreError::StatusConflict {
                actual: report.status,
            });
        }

        let old_status_key = keys::status_report_key(report.status.as_u8(), report_id);
        report.status = to;
        report.updated_at = chrono::Utc::now();

        let value = Self::serialize(&report)?;
        txn.put_cf(&cf_reports, &report_key, &value)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        txn.delete_cf(&cf_by_status, &old_status_key)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let new_status_key = keys::status_report_key(to.as_u8(), report_id);
        txn.put_cf(&cf_by_status, &new_status_key, [])
            .map_err(|e| StoreError::Database(e.to_string()))?;
        txn.commit()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(report)
    }

    fn delete_report(&self, report_id: &ReportId) -> Result<()> {
        let cf_reports = self.cf(cf::REPORTS)?;
        let cf_by_category = self.cf(cf::REPORTS_BY_CATEGORY)?;
        let cf_by_user = self.cf(cf::REPORTS_BY_USER)?;
        let cf_by_status = self.cf(cf::REPORTS_BY_STATUS)?;

        // Get the report to find its index entries
        let report = self.get_report(report_id)?.ok_or(StoreError::NotFound)?;

        let report_key = keys::report_key(report_id);
        let category_key = keys::category_report_key(report.category, report_id);
        let user_key = keys::user_report_key(&report.submitted_by, report_id);
        let status_key = keys::status_report_key(report.status.as_u8(), report_id);

        let txn = self.db.transaction();
        txn.delete_cf(&cf_reports, &report_key)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        txn.delete_cf(&cf_by_category, &category_key)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        txn.delete_cf(&cf_by_user, &user_key)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        txn.delete_cf(&cf_by_status, &status_key)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        txn.commit()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_reports_by_category(&self, category: Category) -> Result<Vec<Report>> {
        let cf_by_category = self.cf(cf::REPORTS_BY_CATEGORY)?;
        let prefix = keys::category_prefix(category);

        let mut reports = Vec::new();
        let iter = self.db.iterator_cf(
            &cf_by_category,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            // Stop once we're past the prefix
            if !key.starts_with(&prefix) {
                break;
            }

            let report_id = keys::extract_report_id_from_tagged_key(&key);
            if let Some(report) = self.get_report(&report_id)? {
                reports.push(report);
            }
        }

        Ok(reports)
    }

    fn list_reports_by_user(&self, user_id: &UserId) -> Result<Vec<Report>> {
        let cf_by_user = self.cf(cf::REPORTS_BY_USER)?;
        let prefix = keys::user_prefix(user_id);

        let mut reports = Vec::new();
        let iter = self.db.iterator_cf(
            &cf_by_user,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let report_id = keys::extract_report_id_from_user_report_key(&key);
            if let Some(report) = self.get_report(&report_id)? {
                reports.push(report);
            }
        }

        Ok(reports)
    }

    fn list_reports_by_status(&self, status: ReportStatus) -> Result<Vec<Report>> {
        let cf_by_status = self.cf(cf::REPORTS_BY_STATUS)?;
        let prefix = keys::status_prefix(status.as_u8());

        let mut reports = Vec::new();
        let iter = self.db.iterator_cf(
            &cf_by_status,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let report_id = keys::extract_report_id_from_tagged_key(&key);
            if let Some(report) = self.get_report(&report_id)? {
                reports.push(report);
            }
        }

        Ok(reports)
    }

    fn count_reports_by_category(&self, category: Category) -> Result<u64> {
        let cf_by_category = self.cf(cf::REPORTS_BY_CATEGORY)?;
        let prefix = keys::category_prefix(category);

        let mut count = 0u64;
        let iter = self.db.iterator_cf(
            &cf_by_category,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            count += 1;
        }

        Ok(count)
    }

    fn count_reports_by_status(&self, status: ReportStatus) -> Result<u64> {
        let cf_by_status = self.cf(cf::REPORTS_BY_STATUS)?;
        let prefix = keys::status_prefix(status.as_u8());

        let mut count = 0u64;
        let iter = self.db.iterator_cf(
            &cf_by_status,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            count += 1;
        }

        Ok(count)
    }

    fn list_all_reports(&self) -> Result<Vec<Report>> {
        let cf_reports = self.cf(cf::REPORTS)?;

        let mut reports = Vec::new();
        let iter = self.db.iterator_cf(&cf_reports, IteratorMode::Start);

        for item in iter {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let report: Report = Self::deserialize(&value)?;
            reports.push(report);
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tempfile::TempDir;

    use super::*;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn create_test_report(store: &RocksStore, user_id: &UserId, category: Category) -> Report {
        let reference_id = store.allocate_reference(category).unwrap();
        Report {
            report_id: ReportId::generate(),
            reference_id,
            category,
            submitted_by: *user_id,
            summary: "lane closure at J14".to_string(),
            details: serde_json::json!({ "carriageway": "northbound" }),
            status: ReportStatus::Submitted,
            attachment_keys: vec![],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    // =========================================================================
    // Allocator
    // =========================================================================

    #[test]
    fn fresh_counter_starts_at_one() {
        let (store, _dir) = create_test_store();
        let reference = store.allocate_reference(Category::Incident).unwrap();
        assert_eq!(reference.to_string(), "IN01");
    }

    #[test]
    fn sequential_allocations_are_contiguous() {
        let (store, _dir) = create_test_store();
        for expected in 1..=10u64 {
            let reference = store.allocate_reference(Category::DailyOccurrence).unwrap();
            assert_eq!(reference.sequence(), expected);
        }
        // The 10th allocation reads DO10
        assert_eq!(store.reference_count(Category::DailyOccurrence).unwrap(), 10);
        let tenth = ReferenceId::new(Category::DailyOccurrence, 10);
        assert_eq!(tenth.to_string(), "DO10");
    }

    #[test]
    fn hundredth_allocation_widens() {
        let (store, _dir) = create_test_store();
        let mut last = None;
        for _ in 0..100 {
            last = Some(store.allocate_reference(Category::Incident).unwrap());
        }
        assert_eq!(last.unwrap().to_string(), "IN100");
    }

    #[test]
    fn categories_are_independent() {
        let (store, _dir) = create_test_store();
        for _ in 0..5 {
            store.allocate_reference(Category::Incident).unwrap();
        }
        let reference = store.allocate_reference(Category::AssetDamage).unwrap();
        assert_eq!(reference.to_string(), "AD01");
        assert_eq!(store.reference_count(Category::Incident).unwrap(), 5);
        assert_eq!(store.reference_count(Category::AssetDamage).unwrap(), 1);
        assert_eq!(store.reference_count(Category::CctvCheck).unwrap(), 0);
    }

    #[test]
    fn concurrent_allocations_are_unique() {
        let (store, _dir) = create_test_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.allocate_reference(Category::CctvCheck).unwrap())
            })
            .collect();

        let references: Vec<ReferenceId> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        let distinct: HashSet<String> = references.iter().map(ToString::to_string).collect();
        assert_eq!(distinct.len(), 50);

        // Sequences form exactly 1..=50, no gaps, no duplicates
        let mut sequences: Vec<u64> = references.iter().map(ReferenceId::sequence).collect();
        sequences.sort_unstable();
        assert_eq!(sequences, (1..=50).collect::<Vec<_>>());
        assert_eq!(store.reference_count(Category::CctvCheck).unwrap(), 50);
    }

    #[test]
    fn concurrent_allocations_across_categories() {
        let (store, _dir) = create_test_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..60)
            .map(|i| {
                let store = Arc::clone(&store);
                let category = Category::ALL[i % Category::ALL.len()];
                std::thread::spawn(move || store.allocate_reference(category).unwrap())
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        for category in Category::ALL {
            assert_eq!(store.reference_count(category).unwrap(), 15);
        }
    }

    #[test]
    fn reference_count_is_zero_before_first_allocation() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.reference_count(Category::AssetDamage).unwrap(), 0);
    }

    #[test]
    fn reset_moves_the_sequence() {
        let (store, _dir) = create_test_store();
        store.reset_reference_count(Category::Incident, 5).unwrap();
        let reference = store.allocate_reference(Category::Incident).unwrap();
        assert_eq!(reference.to_string(), "IN06");
    }

    #[test]
    fn reset_below_high_water_mark_reissues() {
        // Accepted operator risk: resetting backwards repeats references.
        let (store, _dir) = create_test_store();
        for _ in 0..3 {
            store.allocate_reference(Category::Incident).unwrap();
        }
        store.reset_reference_count(Category::Incident, 0).unwrap();
        let reference = store.allocate_reference(Category::Incident).unwrap();
        assert_eq!(reference.to_string(), "IN01");
    }

    #[test]
    fn counters_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = RocksStore::open(dir.path()).unwrap();
            for _ in 0..3 {
                store.allocate_reference(Category::DailyOccurrence).unwrap();
            }
        }
        let store = RocksStore::open(dir.path()).unwrap();
        assert_eq!(store.reference_count(Category::DailyOccurrence).unwrap(), 3);
        let reference = store.allocate_reference(Category::DailyOccurrence).unwrap();
        assert_eq!(reference.to_string(), "DO04");
    }

    #[test]
    fn failed_allocation_leaves_counter_untouched() {
        let dir = TempDir::new().unwrap();
        // Short lock timeout so the blocked allocation errors instead of
        // queueing behind the held lock.
        let store = RocksStore::open_with_lock_timeout(dir.path(), 50).unwrap();
        store.allocate_reference(Category::Incident).unwrap();

        let cf_counters = store.cf(cf::COUNTERS).unwrap();
        let key = keys::counter_key(Category::Incident);

        // Hold the row lock the allocator needs, without committing.
        let blocker = store.db.transaction();
        blocker
            .get_for_update_cf(&cf_counters, &key, true)
            .unwrap();

        let result = store.allocate_reference(Category::Incident);
        assert!(matches!(result, Err(StoreError::AllocationFailed(_))));

        // Dropping the transaction rolls it back and releases the lock.
        drop(blocker);

        // No ID was issued and the counter did not move; the retry picks up
        // exactly where the last success left off.
        assert_eq!(store.reference_count(Category::Incident).unwrap(), 1);
        let reference = store.allocate_reference(Category::Incident).unwrap();
        assert_eq!(reference.to_string(), "IN02");
    }

    // =========================================================================
    // Reports
    // =========================================================================

    #[test]
    fn report_crud() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());
        let report = create_test_report(&store, &user_id, Category::Incident);

        // Create
        store.put_report(&report).unwrap();

        // Read
        let retrieved = store.get_report(&report.report_id).unwrap().unwrap();
        assert_eq!(retrieved.summary, report.summary);
        assert_eq!(retrieved.reference_id, report.reference_id);
        assert_eq!(retrieved.status, ReportStatus::Submitted);

        // Update
        let mut changed = report.clone();
        changed.status = ReportStatus::UnderReview;
        changed.updated_at = chrono::Utc::now();
        store.put_report(&changed).unwrap();
        let updated = store.get_report(&report.report_id).unwrap().unwrap();
        assert_eq!(updated.status, ReportStatus::UnderReview);
        assert!(updated.updated_at >= report.updated_at);

        // Delete
        store.delete_report(&report.report_id).unwrap();
        assert!(store.get_report(&report.report_id).unwrap().is_none());
    }

    #[test]
    fn delete_missing_report_is_not_found() {
        let (store, _dir) = create_test_store();
        let result = store.delete_report(&ReportId::generate());
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn list_reports_by_category() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());

        for _ in 0..2 {
            let report = create_test_report(&store, &user_id, Category::Incident);
            store.put_report(&report).unwrap();
        }
        let damage = create_test_report(&store, &user_id, Category::AssetDamage);
        store.put_report(&damage).unwrap();

        let incidents = store.list_reports_by_category(Category::Incident).unwrap();
        assert_eq!(incidents.len(), 2);
        assert!(incidents.iter().all(|r| r.category == Category::Incident));

        assert_eq!(
            store.count_reports_by_category(Category::Incident).unwrap(),
            2
        );
        assert_eq!(
            store
                .count_reports_by_category(Category::AssetDamage)
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .count_reports_by_category(Category::CctvCheck)
                .unwrap(),
            0
        );
    }

    #[test]
    fn list_reports_by_user() {
        let (store, _dir) = create_test_store();
        let alice = UserId::from_uuid(uuid::Uuid::new_v4());
        let bob = UserId::from_uuid(uuid::Uuid::new_v4());

        for _ in 0..2 {
            let report = create_test_report(&store, &alice, Category::CctvCheck);
            store.put_report(&report).unwrap();
        }
        let report = create_test_report(&store, &bob, Category::CctvCheck);
        store.put_report(&report).unwrap();

        assert_eq!(store.list_reports_by_user(&alice).unwrap().len(), 2);
        assert_eq!(store.list_reports_by_user(&bob).unwrap().len(), 1);
    }

    #[test]
    fn status_index_updated_on_change() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());
        let report = create_test_report(&store, &user_id, Category::DailyOccurrence);
        store.put_report(&report).unwrap();

        assert_eq!(
            store
                .list_reports_by_status(ReportStatus::Submitted)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            store
                .list_reports_by_status(ReportStatus::Closed)
                .unwrap()
                .len(),
            0
        );

        let mut closed = report.clone();
        closed.status = ReportStatus::Closed;
        store.put_report(&closed).unwrap();

        assert_eq!(
            store
                .list_reports_by_status(ReportStatus::Submitted)
                .unwrap()
                .len(),
            0
        );
        assert_eq!(
            store.count_reports_by_status(ReportStatus::Closed).unwrap(),
            1
        );
    }

    #[test]
    fn conditional_status_update_applies_and_reindexes() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());
        let report = create_test_report(&store, &user_id, Category::Incident);
        store.put_report(&report).unwrap();

        let updated = store
            .update_report_status(
                &report.report_id,
                ReportStatus::Submitted,
                ReportStatus::UnderReview,
            )
            .unwrap();
        assert_eq!(updated.status, ReportStatus::UnderReview);
        assert!(updated.updated_at >= report.updated_at);

        assert_eq!(
            store
                .count_reports_by_status(ReportStatus::Submitted)
                .unwrap(),
            0
        );
        assert_eq!(
            store
                .count_reports_by_status(ReportStatus::UnderReview)
                .unwrap(),
            1
        );
    }

    #[test]
    fn stale_expected_status_is_a_conflict() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());
        let report = create_test_report(&store, &user_id, Category::Incident);
        store.put_report(&report).unwrap();

        store
            .update_report_status(
                &report.report_id,
                ReportStatus::Submitted,
                ReportStatus::Closed,
            )
            .unwrap();

        // A caller still holding the Submitted view must not win.
        let result = store.update_report_status(
            &report.report_id,
            ReportStatus::Submitted,
            ReportStatus::UnderReview,
        );
        assert!(matches!(
            result,
            Err(StoreError::StatusConflict {
                actual: ReportStatus::Closed
            })
        ));

        let stored = store.get_report(&report.report_id).unwrap().unwrap();
        assert_eq!(stored.status, ReportStatus::Closed);
    }

    #[test]
    fn conditional_status_update_on_missing_report() {
        let (store, _dir) = create_test_store();
        let result = store.update_report_status(
            &ReportId::generate(),
            ReportStatus::Submitted,
            ReportStatus::Closed,
        );
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn racing_status_updates_admit_one_winner() {
        let (store, _dir) = create_test_store();
        let store = Arc::new(store);
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());
        let report = create_test_report(&store, &user_id, Category::CctvCheck);
        store.put_report(&report).unwrap();

        // Both racers saw the report as Submitted; only one transition may
        // land, the other must observe the winner's status.
        let targets = [ReportStatus::UnderReview, ReportStatus::Closed];
        let handles: Vec<_> = targets
            .into_iter()
            .map(|to| {
                let store = Arc::clone(&store);
                let report_id = report.report_id;
                std::thread::spawn(move || {
                    store.update_report_status(&report_id, ReportStatus::Submitted, to)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(StoreError::StatusConflict { .. }))));

        // The status index holds exactly one entry, for the winner's status.
        let stored = store.get_report(&report.report_id).unwrap().unwrap();
        let indexed: u64 = [
            ReportStatus::Submitted,
            ReportStatus::UnderReview,
            ReportStatus::Closed,
        ]
        .into_iter()
        .map(|s| store.count_reports_by_status(s).unwrap())
        .sum();
        assert_eq!(indexed, 1);
        assert_eq!(store.count_reports_by_status(stored.status).unwrap(), 1);
    }

    #[test]
    fn list_all_reports() {
        let (store, _dir) = create_test_store();
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());

        for category in Category::ALL {
            let report = create_test_report(&store, &user_id, category);
            store.put_report(&report).unwrap();
        }

        assert_eq!(store.list_all_reports().unwrap().len(), 4);
    }
}
