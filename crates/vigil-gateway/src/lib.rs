//! HTTP gateway for the vigil CCTV monitoring portal.
//!
//! This crate provides the public-facing API for the reports desk. It
//! handles:
//!
//! - JWT authentication and role extraction
//! - REST HTTP endpoints for report submission and workflow
//! - Dashboard and counter administration endpoints
//! - Request validation and body/time limits
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Clients                              │
//! │                        (HTTP)                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      vigil-gateway                          │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐    │
//! │  │   Auth      │ │   Router    │ │    Handlers         │    │
//! │  │  Extractor  │ │  + Layers   │ │                     │    │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┼──────────────┐
//!               ▼              ▼              ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │  Report  │   │  Auth    │   │  Store   │
//!        │  Desk    │   │ (JWT)    │   │ (RocksDB)│
//!        └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vigil_gateway::{GatewayConfig, GatewayState, create_router};
//! use vigil_desk::ReportDeskService;
//! use vigil_auth::{AuthConfig, HmacValidator};
//! use vigil_store::RocksStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Initialize dependencies
//! let store = Arc::new(RocksStore::open("/tmp/vigil")?);
//! let desk = Arc::new(ReportDeskService::with_defaults(store));
//! let validator = Arc::new(HmacValidator::new(&AuthConfig::default()));
//!
//! // Create gateway state
//! let config = GatewayConfig::default();
//! let state = GatewayState::new(desk, validator, config);
//!
//! // Create router
//! let app = create_router(state);
//!
//! // Run server
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;

// Re-export key types for convenience
pub use auth::AuthUser;
