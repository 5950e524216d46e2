//! Report desk service implementation.
//!
//! This module provides the `ReportDesk` trait and `ReportDeskService`
//! implementation that coordinates submission, workflow, and dashboard
//! operations over the store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use vigil_core::{Category, ReportId, Role};
use vigil_store::{Report, ReportStatus, Store, StoreError};

use crate::error::{DeskError, Result};
use crate::types::{
    visible_to, Actor, CategoryStats, DashboardStats, DeskConfig, StatusStats, SubmitReportRequest,
};
use crate::workflow;

/// Trait defining the report desk operations.
///
/// This trait provides the complete API the gateway calls into.
/// Implementations handle persistence, authorization, and validation.
#[async_trait]
pub trait ReportDesk: Send + Sync {
    /// Submit a new report: allocate its reference, then persist it.
    ///
    /// Requires a staff or admin actor. The allocation is the only
    /// serialization point; once it succeeds the returned reference is
    /// never reissued (absent an administrative reset), even if persisting
    /// the document fails afterwards.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::RoleDenied` for client actors, and a `Store`
    /// error if the reference cannot be allocated (in which case no
    /// document is persisted — a report without a reference is never
    /// stored).
    async fn submit_report(&self, actor: &Actor, request: SubmitReportRequest) -> Result<Report>;

    /// Get a report by ID.
    ///
    /// Staff and admin may read any report; clients only their own.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::ReportNotFound` if the report doesn't exist, or
    /// `DeskError::NotSubmitter` for a client reading someone else's.
    async fn get_report(&self, actor: &Actor, report_id: &ReportId) -> Result<Report>;

    /// List reports, optionally filtered by category.
    ///
    /// Staff and admin see everything; clients see only their own
    /// submissions.
    async fn list_reports(&self, actor: &Actor, category: Option<Category>) -> Result<Vec<Report>>;

    /// Move a report to a new workflow status.
    ///
    /// Requires a staff or admin actor; the transition must be valid per
    /// the [`workflow`] module.
    async fn update_status(
        &self,
        actor: &Actor,
        report_id: &ReportId,
        status: ReportStatus,
    ) -> Result<Report>;

    /// Aggregate dashboard statistics. Available to any authenticated role;
    /// the counts are portal-wide, but the recent-reports list is filtered
    /// to what the actor may read.
    async fn dashboard(&self, actor: &Actor) -> Result<DashboardStats>;

    /// Diagnostic read of a category's reference counter. Admin only.
    ///
    /// The value may be stale the moment it is returned; it implies
    /// nothing about uniqueness of future allocations.
    async fn reference_count(&self, actor: &Actor, category: Category) -> Result<u64>;

    /// Administrative counter reset. Admin only.
    ///
    /// Subsequent references for the category continue from `value + 1`;
    /// resetting below the high-water mark re-issues references — that is
    /// the operator's call, not guarded here.
    async fn reset_reference_count(
        &self,
        actor: &Actor,
        category: Category,
        value: u64,
    ) -> Result<()>;
}

/// The main report desk service implementation.
pub struct ReportDeskService<S: Store> {
    store: Arc<S>,
    config: DeskConfig,
}

impl<S: Store> ReportDeskService<S> {
    /// Create a new report desk service.
    #[must_use]
    pub fn new(store: Arc<S>, config: DeskConfig) -> Self {
        Self { store, config }
    }

    /// Create with default configuration.
    #[must_use]
    pub fn with_defaults(store: Arc<S>) -> Self {
        Self::new(store, DeskConfig::default())
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Require a staff or admin actor.
    fn require_staff(actor: &Actor, action: &'static str) -> Result<()> {
        if actor.role.is_staff() {
            Ok(())
        } else {
            Err(DeskError::RoleDenied {
                role: actor.role,
                action,
            })
        }
    }

    /// Require an admin actor.
    fn require_admin(actor: &Actor, action: &'static str) -> Result<()> {
        if actor.role == Role::Admin {
            Ok(())
        } else {
            Err(DeskError::RoleDenied {
                role: actor.role,
                action,
            })
        }
    }

    /// Get a report and verify the actor may read it.
    fn get_and_verify(&self, actor: &Actor, report_id: &ReportId) -> Result<Report> {
        let report = self
            .store
            .get_report(report_id)?
            .ok_or(DeskError::ReportNotFound(*report_id))?;

        if !actor.role.is_staff() && report.submitted_by != actor.user_id {
            return Err(DeskError::NotSubmitter {
                user_id: actor.user_id,
                report_id: *report_id,
            });
        }
        Ok(report)
    }
}

#[async_trait]
impl<S: Store + 'static> ReportDesk for ReportDeskService<S> {
    async fn submit_report(&self, actor: &Actor, request: SubmitReportRequest) -> Result<Report> {
        Self::require_staff(actor, "submit reports")?;

        if request.attachment_keys.len() > self.config.max_attachments_per_report {
            return Err(DeskError::TooManyAttachments {
                count: request.attachment_keys.len(),
                limit: self.config.max_attachments_per_report,
            });
        }

        // Allocate first; the reference is attached exactly once at
        // creation and immutable thereafter.
        let reference_id = self.store.allocate_reference(request.category)?;

        let now = Utc::now();
        let report = Report {
            report_id: ReportId::generate(),
            reference_id,
            category: request.category,
            submitted_by: actor.user_id,
            summary: request.summary,
            details: request.details,
            status: ReportStatus::Submitted,
            attachment_keys: request.attachment_keys,
            created_at: now,
            updated_at: now,
        };

        self.store.put_report(&report)?;

        tracing::info!(
            report_id = %report.report_id,
            reference = %report.reference_id,
            category = %report.category,
            user_id = %actor.user_id,
            "Submitted report"
        );

        Ok(report)
    }

    async fn get_report(&self, actor: &Actor, report_id: &ReportId) -> Result<Report> {
        self.get_and_verify(actor, report_id)
    }

    async fn list_reports(&self, actor: &Actor, category: Option<Category>) -> Result<Vec<Report>> {
        let reports = match category {
            Some(category) => self.store.list_reports_by_category(category)?,
            None => {
                if actor.role.is_staff() {
                    self.store.list_all_reports()?
                } else {
                    // Clients never see more than their own; use the index
                    return Ok(self.store.list_reports_by_user(&actor.user_id)?);
                }
            }
        };

        Ok(visible_to(actor, reports))
    }

    async fn update_status(
        &self,
        actor: &Actor,
        report_id: &ReportId,
        status: ReportStatus,
    ) -> Result<Report> {
        Self::require_staff(actor, "update report status")?;

        let mut current = self.get_and_verify(actor, report_id)?.status;
        loop {
            workflow::validate_transition(report_id, current, status)?;

            // Conditional write: if another actor changed the status since we
            // read it, re-validate against what actually landed. Statuses only
            // move forward, so the loop is bounded by the workflow's length.
            match self.store.update_report_status(report_id, current, status) {
                Ok(report) => {
                    tracing::info!(
                        report_id = %report_id,
                        status = ?status,
                        "Updated report status"
                    );
                    return Ok(report);
                }
                Err(StoreError::StatusConflict { actual }) => current = actual,
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn dashboard(&self, actor: &Actor) -> Result<DashboardStats> {
        let mut total_reports = 0u64;
        let mut by_category = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let reports = self.store.count_reports_by_category(category)?;
            let references_issued = self.store.reference_count(category)?;
            total_reports += reports;
            by_category.push(CategoryStats {
                category,
                reports,
                references_issued,
            });
        }

        let by_status = [
            ReportStatus::Submitted,
            ReportStatus::UnderReview,
            ReportStatus::Closed,
        ]
        .into_iter()
        .map(|status| {
            Ok(StatusStats {
                status,
                count: self.store.count_reports_by_status(status)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

        // Counts are portal-wide, but the recent list carries report
        // contents, so clients only get their own entries there.
        let mut recent = visible_to(actor, self.store.list_all_reports()?);
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(self.config.dashboard_recent_limit);

        Ok(DashboardStats {
            total_reports,
            by_category,
            by_status,
            recent,
        })
    }

    async fn reference_count(&self, actor: &Actor, category: Category) -> Result<u64> {
        Self::require_admin(actor, "read reference counters")?;
        Ok(self.store.reference_count(category)?)
    }

    async fn reset_reference_count(
        &self,
        actor: &Actor,
        category: Category,
        value: u64,
    ) -> Result<()> {
        Self::require_admin(actor, "reset reference counters")?;
        self.store.reset_reference_count(category, value)?;

        tracing::warn!(
            category = %category,
            value,
            user_id = %actor.user_id,
            "Administrative counter reset"
        );

        Ok(())
    }
}
