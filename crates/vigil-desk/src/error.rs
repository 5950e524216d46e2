//! Error types for the report desk.
//!
//! This module defines all errors that can occur during submission,
//! workflow, and administrative operations.

use thiserror::Error;
use vigil_core::{ReportId, Role, UserId};
use vigil_store::ReportStatus;

/// A result type using `DeskError`.
pub type Result<T> = std::result::Result<T, DeskError>;

/// Errors that can occur in report desk operations.
#[derive(Debug, Error)]
pub enum DeskError {
    /// The requested report was not found.
    #[error("report not found: {0}")]
    ReportNotFound(ReportId),

    /// The user is not the submitter of the requested report.
    #[error("user {user_id} is not the submitter of report {report_id}")]
    NotSubmitter {
        /// The user making the request.
        user_id: UserId,
        /// The report being accessed.
        report_id: ReportId,
    },

    /// The actor's role does not allow the attempted operation.
    #[error("role {role} may not {action}")]
    RoleDenied {
        /// The actor's role.
        role: Role,
        /// What was attempted.
        action: &'static str,
    },

    /// The requested status transition is not valid.
    #[error(
        "invalid status transition for report {report_id}: cannot move from {from:?} to {to:?}"
    )]
    InvalidTransition {
        /// The report being transitioned.
        report_id: ReportId,
        /// The current status.
        from: ReportStatus,
        /// The requested target status.
        to: ReportStatus,
    },

    /// The submission carries more attachments than allowed.
    #[error("too many attachments: {count} exceeds the limit of {limit}")]
    TooManyAttachments {
        /// Attachments on the request.
        count: usize,
        /// The configured maximum.
        limit: usize,
    },

    /// Storage layer error.
    #[error("storage error: {0}")]
    Store(#[from] vigil_store::StoreError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DeskError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::ReportNotFound(_) => 404,
            Self::NotSubmitter { .. } | Self::RoleDenied { .. } => 403,
            Self::InvalidTransition { .. } => 409,
            Self::TooManyAttachments { .. } => 400,
            Self::Store(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true if this error might be resolved by retrying.
    ///
    /// Allocation failures live under `Store` and are always safe to retry
    /// as a whole call; no ID was issued.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        let report_id = ReportId::generate();
        let user_id = UserId::from_uuid(uuid::Uuid::new_v4());

        assert_eq!(DeskError::ReportNotFound(report_id).http_status_code(), 404);
        assert_eq!(
            DeskError::NotSubmitter { user_id, report_id }.http_status_code(),
            403
        );
        assert_eq!(
            DeskError::RoleDenied {
                role: Role::Client,
                action: "submit reports"
            }
            .http_status_code(),
            403
        );
        assert_eq!(
            DeskError::InvalidTransition {
                report_id,
                from: ReportStatus::Closed,
                to: ReportStatus::Submitted
            }
            .http_status_code(),
            409
        );
        assert_eq!(
            DeskError::TooManyAttachments {
                count: 20,
                limit: 10
            }
            .http_status_code(),
            400
        );
        assert_eq!(DeskError::Internal("x".into()).http_status_code(), 500);
    }

    #[test]
    fn retriable_errors() {
        assert!(DeskError::Internal("x".into()).is_retriable());
        assert!(!DeskError::ReportNotFound(ReportId::generate()).is_retriable());
    }
}
