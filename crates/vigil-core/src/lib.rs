//! Core types and utilities for vigil.
//!
//! This crate provides the foundational types used throughout the vigil
//! report desk:
//!
//! - **Categories**: the four fixed form/report types, each with its own
//!   reference prefix and independent sequence
//! - **Identifiers**: reference IDs (`IN01`, `AD02`, …), report IDs, user IDs
//! - **Roles**: the portal's access levels (admin, staff, client)
//! - **Error types**: common error definitions shared across crates
//!
//! # Example
//!
//! ```
//! use vigil_core::{Category, ReferenceId, ReportId};
//!
//! // Parse a category from its wire name
//! let category: Category = "assetDamage".parse().unwrap();
//! assert_eq!(category.prefix(), "AD");
//!
//! // Format the first reference for that category
//! let reference = ReferenceId::new(category, 1);
//! assert_eq!(reference.to_string(), "AD01");
//!
//! // Generate a report ID
//! let report_id = ReportId::generate();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod category;
pub mod error;
pub mod ids;
pub mod role;

pub use category::Category;
pub use error::{CoreError, Result};
pub use ids::{IdError, ReferenceId, ReportId, UserId};
pub use role::Role;
