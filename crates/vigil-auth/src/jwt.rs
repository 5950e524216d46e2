//! JWT validation and claims extraction.
//!
//! This module provides the core JWT validation logic, including signature
//! verification and claims validation.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use vigil_core::{Role, UserId};

use crate::error::{AuthError, Result};
use crate::AuthConfig;

/// Validated claims extracted from a JWT.
#[derive(Debug, Clone)]
pub struct ValidatedClaims {
    /// The user ID extracted from the `sub` claim (UUID).
    pub user_id: UserId,
    /// The portal role carried in the `role` claim.
    pub role: Role,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Trait for validating bearer tokens.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validate a token and extract claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is invalid, expired, or cannot be
    /// validated.
    async fn validate(&self, token: &str) -> Result<ValidatedClaims>;
}

/// Raw claims from a JWT before validation.
#[derive(Debug, Deserialize)]
struct RawClaims {
    /// Issuer (validated by jsonwebtoken)
    #[allow(dead_code)]
    iss: String,
    /// Subject (user ID as UUID string)
    sub: String,
    /// Portal role
    role: String,
    /// Audience (can be string or array)
    #[serde(default)]
    aud: Audience,
    /// Expiration timestamp
    exp: u64,
    /// Issued at timestamp (validated by jsonwebtoken)
    #[allow(dead_code)]
    #[serde(default)]
    iat: u64,
}

/// Audience claim that can be either a string or array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
enum Audience {
    Single(String),
    Multiple(Vec<String>),
    #[default]
    None,
}

impl Audience {
    fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(s) => s == value,
            Self::Multiple(v) => v.iter().any(|s| s == value),
            Self::None => false,
        }
    }
}

/// Shared-secret HS256 validator.
///
/// The identity provider signs portal tokens with a secret shared with this
/// service; no key material is fetched at runtime.
pub struct HmacValidator {
    config: AuthConfig,
    key: DecodingKey,
}

impl HmacValidator {
    /// Create a new HMAC validator from the given configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config: config.clone(),
            key,
        }
    }
}

#[async_trait]
impl TokenValidator for HmacValidator {
    async fn validate(&self, token: &str) -> Result<ValidatedClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        // Audience is validated manually since it can be string or array
        validation.validate_aud = false;
        validation.validate_exp = true;

        let token_data =
            decode::<RawClaims>(token, &self.key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        let claims = token_data.claims;

        if !claims.aud.contains(&self.config.audience) {
            return Err(AuthError::InvalidAudience);
        }

        let user_id = UserId::from_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;
        let role = Role::from_str(&claims.role)
            .map_err(|_| AuthError::InvalidRole(claims.role.clone()))?;

        let exp_secs = i64::try_from(claims.exp).unwrap_or(i64::MAX);
        let expires_at = DateTime::from_timestamp(exp_secs, 0)
            .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".to_string()))?;

        Ok(ValidatedClaims {
            user_id,
            role,
            expires_at,
        })
    }
}

/// A mock validator for testing.
///
/// This validator accepts any token in the format
/// `test-token:<user_uuid>:<role>` and extracts the identity from it.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTokenValidator;

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl TokenValidator for MockTokenValidator {
    async fn validate(&self, token: &str) -> Result<ValidatedClaims> {
        // Expected format: test-token:<user_uuid>:<role>
        let rest = token.strip_prefix("test-token:").ok_or_else(|| {
            AuthError::InvalidToken("expected test-token:<user>:<role>".to_string())
        })?;

        let parts: Vec<&str> = rest.split(':').collect();
        if parts.len() != 2 {
            return Err(AuthError::InvalidToken(
                "expected test-token:<user>:<role>".to_string(),
            ));
        }

        let user_id = UserId::from_str(parts[0]).map_err(|_| AuthError::InvalidUserId)?;
        let role =
            Role::from_str(parts[1]).map_err(|_| AuthError::InvalidRole(parts[1].to_string()))?;

        Ok(ValidatedClaims {
            user_id,
            role,
            expires_at: Utc::now() + chrono::Duration::hours(1),
        })
    }
}
