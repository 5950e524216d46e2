//! Core identifier types for vigil.
//!
//! This module provides the human-readable reference ID attached to
//! submitted documents, plus strongly-typed UUIDs for reports and users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A human-readable sequential reference, e.g. `IN07` or `CC23`.
///
/// Composed of the category's two-letter prefix and a sequence number
/// zero-padded to the category's digit width. The padding is a display
/// minimum: sequence 100 formats as `IN100`, not an error.
///
/// A reference is allocated exactly once per document and never reused in
/// normal operation (an administrative counter reset can re-issue numbers;
/// that risk is the operator's).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceId {
    category: Category,
    sequence: u64,
}

impl ReferenceId {
    /// Create a reference from a category and sequence number.
    #[must_use]
    pub const fn new(category: Category, sequence: u64) -> Self {
        Self { category, sequence }
    }

    /// The category this reference belongs to.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// The numeric sequence component.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Parse a reference from its display form.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is not one of the four fixed category
    /// prefixes or the remainder is not a positive decimal number.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.len() < 3 || !s.is_char_boundary(2) {
            return Err(IdError::InvalidReference);
        }
        let (prefix, digits) = s.split_at(2);
        let category = Category::from_prefix(prefix).ok_or(IdError::InvalidReference)?;
        let sequence: u64 = digits.parse().map_err(|_| IdError::InvalidReference)?;
        if sequence == 0 {
            return Err(IdError::InvalidReference);
        }
        Ok(Self { category, sequence })
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:0width$}",
            self.category.prefix(),
            self.sequence,
            width = self.category.digit_width()
        )
    }
}

impl FromStr for ReferenceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ReferenceId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReferenceId> for String {
    fn from(id: ReferenceId) -> Self {
        id.to_string()
    }
}

/// A 16-byte report identifier based on UUID v4.
///
/// Report IDs are the primary key for stored documents; the reference ID is
/// the human-facing label, the report ID is the machine one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportId(uuid::Uuid);

impl ReportId {
    /// Create a `ReportId` from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random `ReportId`.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Return the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Return the bytes of the UUID.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl FromStr for ReportId {
    type Err = IdError;

    /// Parse a `ReportId` from a UUID string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidUuid)?;
        Ok(Self(uuid))
    }
}

impl fmt::Debug for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReportId({})", self.0)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ReportId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportId> for String {
    fn from(id: ReportId) -> Self {
        id.0.to_string()
    }
}

impl AsRef<[u8]> for ReportId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// A 16-byte user identifier (UUID format).
///
/// User IDs come from the identity provider, extracted from JWT `sub`
/// claims.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Create a `UserId` from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Return the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Return the bytes of the UUID.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl FromStr for UserId {
    type Err = IdError;

    /// Parse a `UserId` from a UUID string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidUuid)?;
        Ok(Self(uuid))
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0.to_string()
    }
}

impl AsRef<[u8]> for UserId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid reference (unknown prefix or bad number).
    #[error("invalid reference ID format")]
    InvalidReference,

    /// The input is not a valid UUID.
    #[error("invalid UUID format")]
    InvalidUuid,
}
