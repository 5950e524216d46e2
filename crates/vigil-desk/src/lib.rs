//! Report desk business logic for vigil.
//!
//! This crate provides the core logic between the HTTP gateway and the
//! store: role and ownership enforcement, the submission path (allocate a
//! reference, then persist the document), the report status workflow, and
//! dashboard aggregation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Gateway (HTTP)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ReportDeskService                        │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐    │
//! │  │ Submission  │ │  Workflow   │ │    Dashboard        │    │
//! │  │ + authz     │ │  validation │ │    aggregation      │    │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                       ┌────────────┐
//!                       │   Store    │
//!                       │ (RocksDB)  │
//!                       └────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use vigil_core::{Category, Role, UserId};
//! use vigil_desk::{Actor, ReportDesk, ReportDeskService, SubmitReportRequest};
//! use vigil_store::RocksStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RocksStore::open("/tmp/vigil-db")?);
//! let desk = ReportDeskService::with_defaults(store);
//!
//! let actor = Actor {
//!     user_id: UserId::from_uuid(uuid::Uuid::new_v4()),
//!     role: Role::Staff,
//! };
//! let request = SubmitReportRequest::new(Category::Incident, "debris on carriageway");
//! let report = desk.submit_report(&actor, request).await?;
//!
//! println!("assigned {}", report.reference_id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod service;
pub mod types;
pub mod workflow;

pub use error::{DeskError, Result};
pub use service::{ReportDesk, ReportDeskService};
pub use types::{Actor, CategoryStats, DashboardStats, DeskConfig, StatusStats, SubmitReportRequest};

// Re-export commonly used types from dependencies for convenience
pub use vigil_core::{Category, ReferenceId, ReportId, Role, UserId};
pub use vigil_store::{Report, ReportStatus};
