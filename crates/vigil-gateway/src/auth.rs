//! Authentication middleware and extractors.
//!
//! This module provides the `AuthUser` extractor that validates JWT tokens
//! and extracts user identity and role from requests.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use vigil_auth::{TokenValidator, ValidatedClaims};
use vigil_core::{Role, UserId};
use vigil_desk::{Actor, ReportDesk};

use crate::error::ApiError;
use crate::state::GatewayState;

/// An authenticated user extracted from a JWT token.
///
/// This extractor validates the `Authorization: Bearer <token>` header
/// and provides access to the user's identity and portal role.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The portal user ID.
    pub user_id: UserId,
    /// The portal role carried in the token.
    pub role: Role,
}

impl AuthUser {
    /// Create an `AuthUser` from validated claims.
    #[must_use]
    pub const fn from_claims(claims: &ValidatedClaims) -> Self {
        Self {
            user_id: claims.user_id,
            role: claims.role,
        }
    }

    /// The desk-level actor for this user.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        Actor {
            user_id: self.user_id,
            role: self.role,
        }
    }
}

impl<D, V> FromRequestParts<Arc<GatewayState<D, V>>> for AuthUser
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<GatewayState<D, V>>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let claims = state.validator.validate(token).await?;

        Ok(AuthUser::from_claims(&claims))
    }
}
