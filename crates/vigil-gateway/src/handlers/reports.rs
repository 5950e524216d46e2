//! Report submission and workflow endpoints.
//!
//! This module provides handlers for submitting reports, reading them back,
//! and moving them through the review workflow.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vigil_auth::TokenValidator;
use vigil_core::{Category, ReportId};
use vigil_desk::{Report, ReportDesk, ReportStatus, SubmitReportRequest};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::GatewayState;

/// Maximum length of a report summary, in characters.
const MAX_SUMMARY_CHARS: usize = 200;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Response for a single report.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Report ID.
    pub report_id: String,
    /// Human-facing reference, e.g. "IN07".
    pub reference_id: String,
    /// Report category.
    pub category: Category,
    /// Submitting user.
    pub submitted_by: String,
    /// One-line summary.
    pub summary: String,
    /// Free-form structured details.
    pub details: serde_json::Value,
    /// Workflow status.
    pub status: ReportStatus,
    /// Object keys of uploaded attachments.
    pub attachment_keys: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            report_id: report.report_id.to_string(),
            reference_id: report.reference_id.to_string(),
            category: report.category,
            submitted_by: report.submitted_by.to_string(),
            summary: report.summary,
            details: report.details,
            status: report.status,
            attachment_keys: report.attachment_keys,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

/// Response for a report list.
#[derive(Debug, Serialize)]
pub struct ListReportsResponse {
    /// List of reports.
    pub reports: Vec<ReportResponse>,
}

/// Request to submit a report.
#[derive(Debug, Deserialize)]
pub struct SubmitReportBody {
    /// Report category, e.g. "incident" or "cctvCheck".
    pub category: String,
    /// One-line summary (1-200 characters).
    pub summary: String,
    /// Free-form structured details.
    #[serde(default)]
    pub details: serde_json::Value,
    /// Object keys of uploaded attachments.
    #[serde(default)]
    pub attachment_keys: Vec<String>,
}

/// Query parameters for report listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by category wire name.
    #[serde(default)]
    pub category: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Submit a new report.
///
/// The reference is allocated and attached before the document is stored;
/// the response carries the final reference (e.g. "IN07").
///
/// # Errors
///
/// Returns an error if:
/// - The category is unknown or the summary is empty/too long
/// - The actor is a client (staff and admin only)
/// - The reference cannot be allocated
pub async fn submit_report<D, V>(
    State(state): State<Arc<GatewayState<D, V>>>,
    user: AuthUser,
    Json(body): Json<SubmitReportBody>,
) -> Result<impl IntoResponse, ApiError>
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    let category = parse_category(&body.category)?;

    let summary = body.summary.trim();
    if summary.is_empty() || summary.chars().count() > MAX_SUMMARY_CHARS {
        return Err(ApiError::BadRequest(format!(
            "summary must be 1-{MAX_SUMMARY_CHARS} characters"
        )));
    }

    let mut request = SubmitReportRequest::new(category, summary);
    request.details = body.details;
    request.attachment_keys = body.attachment_keys;

    let report = state.desk.submit_report(&user.actor(), request).await?;

    Ok((StatusCode::CREATED, Json(ReportResponse::from(report))))
}

/// List reports visible to the authenticated user.
///
/// Staff and admin see all reports; clients only their own. An optional
/// `category` query parameter narrows the listing.
///
/// # Errors
///
/// Returns an error if the category filter is unknown or the desk
/// operation fails.
pub async fn list_reports<D, V>(
    State(state): State<Arc<GatewayState<D, V>>>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    let category = query
        .category
        .as_deref()
        .map(parse_category)
        .transpose()?;

    let reports = state.desk.list_reports(&user.actor(), category).await?;

    let response = ListReportsResponse {
        reports: reports.into_iter().map(ReportResponse::from).collect(),
    };

    Ok(Json(response))
}

/// Get a single report by ID.
///
/// # Errors
///
/// Returns an error if the report is not found or a client tries to read
/// somebody else's report.
pub async fn get_report<D, V>(
    State(state): State<Arc<GatewayState<D, V>>>,
    user: AuthUser,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    let report_id = parse_report_id(&report_id)?;
    let report = state.desk.get_report(&user.actor(), &report_id).await?;

    Ok(Json(ReportResponse::from(report)))
}

/// Move a report into review.
///
/// # Errors
///
/// Returns an error if the report is not found, the actor is a client, or
/// the report is not in a state that can enter review.
pub async fn review_report<D, V>(
    State(state): State<Arc<GatewayState<D, V>>>,
    user: AuthUser,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    let report_id = parse_report_id(&report_id)?;
    let report = state
        .desk
        .update_status(&user.actor(), &report_id, ReportStatus::UnderReview)
        .await?;

    Ok(Json(ReportResponse::from(report)))
}

/// Close a report.
///
/// # Errors
///
/// Returns an error if the report is not found, the actor is a client, or
/// the report is already closed.
pub async fn close_report<D, V>(
    State(state): State<Arc<GatewayState<D, V>>>,
    user: AuthUser,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    let report_id = parse_report_id(&report_id)?;
    let report = state
        .desk
        .update_status(&user.actor(), &report_id, ReportStatus::Closed)
        .await?;

    Ok(Json(ReportResponse::from(report)))
}

// =============================================================================
// Helpers
// =============================================================================

/// Parse a category wire name, mapping failures to 400.
pub(crate) fn parse_category(s: &str) -> Result<Category, ApiError> {
    Category::from_str(s).map_err(|_| ApiError::BadRequest(format!("unknown category: {s}")))
}

/// Parse a report ID from a path segment, mapping failures to 400.
fn parse_report_id(s: &str) -> Result<ReportId, ApiError> {
    ReportId::from_str(s).map_err(|_| ApiError::BadRequest(format!("invalid report id: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_category_accepts_wire_names() {
        assert_eq!(parse_category("incident").unwrap(), Category::Incident);
        assert_eq!(parse_category("cctvCheck").unwrap(), Category::CctvCheck);
        assert!(parse_category("pothole").is_err());
    }

    #[test]
    fn parse_report_id_rejects_garbage() {
        assert!(parse_report_id("not-a-uuid").is_err());
        let id = ReportId::generate();
        assert_eq!(parse_report_id(&id.to_string()).unwrap(), id);
    }
}
