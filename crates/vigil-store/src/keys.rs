//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions to encode and decode keys for the counter
//! records and the report indexes. All index keys are designed to support
//! efficient prefix scans.

use vigil_core::{Category, ReportId, UserId};

/// Encode a counter key: the category's wire name.
///
/// The counter collection is keyed by category name so it reads naturally
/// in diagnostics (`incident`, `assetDamage`, …).
#[must_use]
pub fn counter_key(category: Category) -> Vec<u8> {
    category.as_str().as_bytes().to_vec()
}

/// Encode a report key (just the report ID bytes).
#[must_use]
pub fn report_key(report_id: &ReportId) -> Vec<u8> {
    report_id.as_bytes().to_vec()
}

/// Encode a category-report index key: `category || report_id`.
///
/// This allows efficient prefix scans for all reports in a category.
#[must_use]
pub fn category_report_key(category: Category, report_id: &ReportId) -> Vec<u8> {
    let mut key = Vec::with_capacity(17);
    key.push(category.as_u8());
    key.extend_from_slice(report_id.as_bytes());
    key
}

/// Encode a category prefix for scanning all reports by category.
#[must_use]
pub fn category_prefix(category: Category) -> Vec<u8> {
    vec![category.as_u8()]
}

/// Encode a user-report index key: `user_id || report_id`.
///
/// This allows efficient prefix scans for all reports submitted by a user.
#[must_use]
pub fn user_report_key(user_id: &UserId, report_id: &ReportId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(user_id.as_bytes());
    key.extend_from_slice(report_id.as_bytes());
    key
}

/// Encode a user prefix for scanning all reports by user.
#[must_use]
pub fn user_prefix(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Encode a status-report index key: `status || report_id`.
#[must_use]
pub fn status_report_key(status: u8, report_id: &ReportId) -> Vec<u8> {
    let mut key = Vec::with_capacity(17);
    key.push(status);
    key.extend_from_slice(report_id.as_bytes());
    key
}

/// Encode a status prefix for scanning all reports by status.
#[must_use]
pub fn status_prefix(status: u8) -> Vec<u8> {
    vec![status]
}

/// Extract the report ID from a single-byte-prefixed index key
/// (`category || report_id` or `status || report_id`).
///
/// # Panics
///
/// Panics if the key is not at least 17 bytes.
#[must_use]
pub fn extract_report_id_from_tagged_key(key: &[u8]) -> ReportId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[1..17]);
    ReportId::from_uuid(uuid::Uuid::from_bytes(bytes))
}

/// Extract the report ID from a user-report key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_report_id_from_user_report_key(key: &[u8]) -> ReportId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    ReportId::from_uuid(uuid::Uuid::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_keys_use_wire_names() {
        assert_eq!(counter_key(Category::Incident), b"incident".to_vec());
        assert_eq!(counter_key(Category::AssetDamage), b"assetDamage".to_vec());
        assert_eq!(
            counter_key(Category::DailyOccurrence),
            b"dailyOccurrence".to_vec()
        );
        assert_eq!(counter_key(Category::CctvCheck), b"cctvCheck".to_vec());
    }

    #[test]
    fn category_report_key_roundtrip() {
        let report_id = ReportId::generate();
        let key = category_report_key(Category::CctvCheck, &report_id);
        assert_eq!(key.len(), 17);

        let extracted = extract_report_id_from_tagged_key(&key);
        assert_eq!(extracted, report_id);
    }

    #[test]
    fn user_report_key_roundtrip() {
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());
        let report_id = ReportId::generate();

        let key = user_report_key(&user_id, &report_id);
        assert_eq!(key.len(), 32);

        let extracted = extract_report_id_from_user_report_key(&key);
        assert_eq!(extracted, report_id);
    }

    #[test]
    fn prefix_scan_simulation() {
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());
        let report_a = ReportId::generate();
        let report_b = ReportId::generate();

        let key_a = user_report_key(&user_id, &report_a);
        let key_b = user_report_key(&user_id, &report_b);
        let prefix = user_prefix(&user_id);

        // Both keys should start with the user prefix
        assert!(key_a.starts_with(&prefix));
        assert!(key_b.starts_with(&prefix));

        let cat_key = category_report_key(Category::Incident, &report_a);
        assert!(cat_key.starts_with(&category_prefix(Category::Incident)));
        assert!(!cat_key.starts_with(&category_prefix(Category::CctvCheck)));
    }
}
