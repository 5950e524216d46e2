//! Common error types for vigil.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors for the closed name sets shared across the vigil crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A category name outside the fixed set was supplied.
    ///
    /// Categories are a closed enum; this only arises where text enters the
    /// system and is a caller bug, never retried.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A role name outside the fixed set was supplied.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
