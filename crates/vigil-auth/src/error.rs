//! Authentication error types.

use thiserror::Error;

/// A result type using `AuthError`.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during token validation.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The JWT has expired.
    #[error("token expired")]
    TokenExpired,

    /// The JWT signature is invalid.
    #[error("invalid signature")]
    InvalidSignature,

    /// The JWT issuer does not match the expected value.
    #[error("invalid issuer")]
    InvalidIssuer,

    /// The JWT audience does not match the expected value.
    #[error("invalid audience")]
    InvalidAudience,

    /// The user ID in the token is malformed.
    #[error("invalid user ID format")]
    InvalidUserId,

    /// The role claim is not one of the portal roles.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// A required claim is missing from the token.
    #[error("missing required claim: {0}")]
    MissingClaim(String),

    /// The token format is invalid.
    #[error("invalid token format: {0}")]
    InvalidToken(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Returns `true` if this error indicates the client should retry with
    /// a new token.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::TokenExpired)
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::TokenExpired
            | Self::InvalidSignature
            | Self::InvalidIssuer
            | Self::InvalidAudience
            | Self::InvalidUserId
            | Self::MissingClaim(_)
            | Self::InvalidToken(_) => 401,
            Self::InvalidRole(_) => 403,
            Self::Internal(_) => 500,
        }
    }
}
