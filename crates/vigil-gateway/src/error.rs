//! API error types and responses.
//!
//! This module defines the standard error format for all API responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use vigil_auth::AuthError;
use vigil_desk::DeskError;
use vigil_store::StoreError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid authentication token.
    #[error("unauthorized")]
    Unauthorized,

    /// User does not have permission to access this resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with the current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Invalid request body or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::InvalidIssuer
            | AuthError::InvalidAudience
            | AuthError::InvalidUserId
            | AuthError::MissingClaim(_)
            | AuthError::InvalidToken(_) => Self::Unauthorized,
            AuthError::InvalidRole(role) => Self::Forbidden(format!("unknown role {role}")),
            AuthError::Internal(_) => {
                tracing::error!(error = %err, "Auth internal error");
                Self::Internal("authentication service error".to_string())
            }
        }
    }
}

impl From<DeskError> for ApiError {
    fn from(err: DeskError) -> Self {
        match err {
            DeskError::ReportNotFound(id) => Self::NotFound(format!("report {id}")),
            DeskError::NotSubmitter { report_id, .. } => {
                Self::Forbidden(format!("report {report_id} belongs to another user"))
            }
            DeskError::RoleDenied { role, action } => {
                Self::Forbidden(format!("role {role} may not {action}"))
            }
            DeskError::InvalidTransition { from, to, .. } => {
                Self::Conflict(format!("cannot move report from {from:?} to {to:?}"))
            }
            DeskError::TooManyAttachments { count, limit } => {
                Self::BadRequest(format!("{count} attachments exceeds the limit of {limit}"))
            }
            DeskError::Store(store_err) => Self::from(store_err),
            DeskError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Self::Internal(msg)
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound("record".to_string()),
            StoreError::StatusConflict { .. } => {
                Self::Conflict("report status changed concurrently".to_string())
            }
            StoreError::AllocationFailed(msg) => {
                tracing::error!(error = %msg, "Reference allocation failed");
                Self::Internal("reference allocation failed".to_string())
            }
            StoreError::CorruptCounter(_)
            | StoreError::Database(_)
            | StoreError::Serialization(_) => {
                tracing::error!(error = %err, "Store error");
                Self::Internal("storage error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("test".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("test".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::BadRequest("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_codes() {
        assert_eq!(ApiError::Unauthorized.code(), "unauthorized");
        assert_eq!(ApiError::Forbidden("test".into()).code(), "forbidden");
        assert_eq!(ApiError::NotFound("test".into()).code(), "not_found");
        assert_eq!(ApiError::BadRequest("test".into()).code(), "bad_request");
    }

    #[test]
    fn auth_errors_map_to_unauthorized() {
        let api: ApiError = AuthError::TokenExpired.into();
        assert_eq!(api.status_code(), StatusCode::UNAUTHORIZED);

        let api: ApiError = AuthError::InvalidRole("owner".into()).into();
        assert_eq!(api.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn allocation_failure_is_internal() {
        let api: ApiError = StoreError::AllocationFailed("lock timeout".into()).into();
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.code(), "internal_error");
    }
}
