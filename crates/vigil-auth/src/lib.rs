//! JWT validation for vigil.
//!
//! Tokens are issued by the company's external identity provider
//! (email/password and OAuth flows live there, not here). This crate only
//! validates them: HS256 signature over a shared secret, issuer/audience
//! checks, and extraction of the user ID and portal role from the claims.
//!
//! # Example
//!
//! ```no_run
//! use vigil_auth::{AuthConfig, HmacValidator, TokenValidator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig {
//!     issuer: "https://id.example.com".to_string(),
//!     audience: "vigil-portal".to_string(),
//!     secret: "shared-secret".to_string(),
//! };
//!
//! let validator = HmacValidator::new(&config);
//!
//! // In a request handler:
//! let claims = validator.validate("eyJhbGciOiJIUzI1NiJ9...").await?;
//! println!("user {} with role {}", claims.user_id, claims.role);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod jwt;

pub use error::{AuthError, Result};
pub use jwt::{HmacValidator, TokenValidator, ValidatedClaims};

#[cfg(any(test, feature = "test-utils"))]
pub use jwt::MockTokenValidator;

/// Configuration for token validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Expected JWT issuer (`iss` claim).
    pub issuer: String,
    /// Expected JWT audience (`aud` claim).
    pub audience: String,
    /// Shared HMAC secret the identity provider signs tokens with.
    pub secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "https://id.example.com".to_string(),
            audience: "vigil-portal".to_string(),
            secret: String::new(),
        }
    }
}
