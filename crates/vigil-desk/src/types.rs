//! Request, response, and configuration types for the report desk.

use serde::{Deserialize, Serialize};
use vigil_core::{Category, Role, UserId};
use vigil_store::{Report, ReportStatus};

/// The authenticated caller of a desk operation.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    /// The user performing the operation.
    pub user_id: UserId,
    /// Their portal role.
    pub role: Role,
}

/// Request to submit a new report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReportRequest {
    /// Which of the four form types is being submitted.
    pub category: Category,
    /// Short summary line shown in listings.
    pub summary: String,
    /// Category-specific form fields, stored as-is.
    #[serde(default)]
    pub details: serde_json::Value,
    /// Object-storage keys of already-uploaded attachments.
    #[serde(default)]
    pub attachment_keys: Vec<String>,
}

impl SubmitReportRequest {
    /// Create a request with the given category and summary and no extras.
    #[must_use]
    pub fn new(category: Category, summary: impl Into<String>) -> Self {
        Self {
            category,
            summary: summary.into(),
            details: serde_json::Value::Null,
            attachment_keys: Vec::new(),
        }
    }

    /// Attach form fields to the request.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

/// Aggregated portal statistics for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total number of stored reports across all categories.
    pub total_reports: u64,
    /// Per-category report and reference counts, in fixed category order.
    pub by_category: Vec<CategoryStats>,
    /// Per-status report counts.
    pub by_status: Vec<StatusStats>,
    /// Most recently submitted reports, newest first, capped by
    /// [`DeskConfig::dashboard_recent_limit`].
    pub recent: Vec<Report>,
}

/// Per-category dashboard entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    /// The category.
    pub category: Category,
    /// Number of stored reports in this category.
    pub reports: u64,
    /// Number of references issued for this category. Can exceed `reports`
    /// when an allocation was consumed without a persisted document, or
    /// trail it after an administrative counter reset.
    pub references_issued: u64,
}

/// Per-status dashboard entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusStats {
    /// The workflow status.
    pub status: ReportStatus,
    /// Number of reports currently in this status.
    pub count: u64,
}

/// Configuration for the report desk service.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// Maximum number of attachments accepted on one submission.
    pub max_attachments_per_report: usize,
    /// How many recent reports the dashboard carries.
    pub dashboard_recent_limit: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            max_attachments_per_report: 10,
            dashboard_recent_limit: 10,
        }
    }
}

/// Filter a listing to what the actor may see: staff and admin see
/// everything, clients only their own submissions.
#[must_use]
pub fn visible_to(actor: &Actor, reports: Vec<Report>) -> Vec<Report> {
    if actor.role.is_staff() {
        reports
    } else {
        reports
            .into_iter()
            .filter(|r| r.submitted_by == actor.user_id)
            .collect()
    }
}
