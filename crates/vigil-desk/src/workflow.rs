//! Report status workflow.
//!
//! Reports move forward only: a submitted report can be taken under review
//! or closed directly, a report under review can be closed, and a closed
//! report stays closed.
//!
//! ```text
//! ┌───────────┐      ┌─────────────┐      ┌──────────┐
//! │ Submitted │─────▶│ UnderReview │─────▶│  Closed  │
//! └─────┬─────┘      └─────────────┘      └──────────┘
//!       │                                      ▲
//!       └──────────────────────────────────────┘
//! ```

use vigil_core::ReportId;
use vigil_store::ReportStatus;

use crate::error::{DeskError, Result};

/// Validates a status transition and returns the target status if valid.
///
/// # Errors
///
/// Returns `DeskError::InvalidTransition` if the transition is not allowed.
pub fn validate_transition(
    report_id: &ReportId,
    from: ReportStatus,
    to: ReportStatus,
) -> Result<ReportStatus> {
    if is_valid_transition(from, to) {
        Ok(to)
    } else {
        Err(DeskError::InvalidTransition {
            report_id: *report_id,
            from,
            to,
        })
    }
}

/// Check if a status transition is valid according to the workflow.
#[must_use]
pub const fn is_valid_transition(from: ReportStatus, to: ReportStatus) -> bool {
    use ReportStatus::{Closed, Submitted, UnderReview};

    matches!(
        (from, to),
        (Submitted, UnderReview | Closed) | (UnderReview, Closed)
    )
}

/// Returns true if the report can still be worked.
#[must_use]
pub const fn is_open(status: ReportStatus) -> bool {
    matches!(status, ReportStatus::Submitted | ReportStatus::UnderReview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use ReportStatus::{Closed, Submitted, UnderReview};

        assert!(is_valid_transition(Submitted, UnderReview));
        assert!(is_valid_transition(Submitted, Closed));
        assert!(is_valid_transition(UnderReview, Closed));
    }

    #[test]
    fn invalid_transitions() {
        use ReportStatus::{Closed, Submitted, UnderReview};

        // No reopening
        assert!(!is_valid_transition(Closed, Submitted));
        assert!(!is_valid_transition(Closed, UnderReview));
        // No going back
        assert!(!is_valid_transition(UnderReview, Submitted));
        // No self-loops
        assert!(!is_valid_transition(Submitted, Submitted));
        assert!(!is_valid_transition(Closed, Closed));
    }

    #[test]
    fn validate_transition_err() {
        let report_id = ReportId::generate();
        let result = validate_transition(&report_id, ReportStatus::Closed, ReportStatus::Submitted);

        match result {
            Err(DeskError::InvalidTransition { from, to, .. }) => {
                assert_eq!(from, ReportStatus::Closed);
                assert_eq!(to, ReportStatus::Submitted);
            }
            _ => panic!("expected InvalidTransition error"),
        }
    }

    #[test]
    fn open_statuses() {
        assert!(is_open(ReportStatus::Submitted));
        assert!(is_open(ReportStatus::UnderReview));
        assert!(!is_open(ReportStatus::Closed));
    }
}
