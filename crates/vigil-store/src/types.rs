//! Domain types stored in the database.
//!
//! These types represent the persisted state of submitted reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_core::{Category, ReferenceId, ReportId, UserId};

/// A submitted report/form document stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier for the report.
    pub report_id: ReportId,
    /// The human-readable reference assigned at submission, immutable
    /// thereafter.
    pub reference_id: ReferenceId,
    /// Which of the four form types this is.
    pub category: Category,
    /// User who submitted the report.
    pub submitted_by: UserId,
    /// Short summary line shown in listings.
    pub summary: String,
    /// Category-specific form fields, carried as-is.
    pub details: serde_json::Value,
    /// Current workflow status.
    pub status: ReportStatus,
    /// Object-storage keys of uploaded attachments. The objects themselves
    /// live in the external file store.
    #[serde(default)]
    pub attachment_keys: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Workflow status of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ReportStatus {
    /// Freshly submitted, not yet looked at.
    Submitted = 1,
    /// Being worked by staff.
    UnderReview = 2,
    /// Resolved and closed. Reports are never reopened.
    Closed = 3,
}

impl ReportStatus {
    /// Convert the status to its numeric representation.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Try to convert a numeric value to a `ReportStatus`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Submitted),
            2 => Some(Self::UnderReview),
            3 => Some(Self::Closed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_numeric_roundtrip() {
        for status in [
            ReportStatus::Submitted,
            ReportStatus::UnderReview,
            ReportStatus::Closed,
        ] {
            assert_eq!(ReportStatus::from_u8(status.as_u8()), Some(status));
        }
        assert_eq!(ReportStatus::from_u8(0), None);
        assert_eq!(ReportStatus::from_u8(4), None);
    }

    #[test]
    fn status_serde_camel_case() {
        let json = serde_json::to_string(&ReportStatus::UnderReview).unwrap();
        assert_eq!(json, "\"underReview\"");
    }
}
