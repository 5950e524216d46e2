//! Vigil Gateway - HTTP API for the CCTV monitoring portal.
//!
//! This is the main entry point for the gateway service. The gateway
//! provides the public API for report submission, the review workflow,
//! the dashboard, and counter administration.
//!
//! # Dev Mode
//!
//! Build with `--features dev-mode` to use a mock JWT validator that
//! doesn't require a shared HMAC secret. Use tokens in format:
//! `test-token:<user-uuid>:<role>`

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(not(feature = "dev-mode"))]
use vigil_auth::{AuthConfig, HmacValidator};
#[cfg(feature = "dev-mode")]
use vigil_auth::MockTokenValidator;
use vigil_desk::ReportDeskService;
use vigil_gateway::{create_router, GatewayConfig, GatewayState};
use vigil_store::RocksStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vigil=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Vigil Gateway");

    // Load configuration from environment
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/vigil".into());

    tracing::info!(
        listen_addr = %listen_addr,
        data_dir = %data_dir,
        "Gateway configuration loaded"
    );

    // Initialize RocksDB store
    tracing::info!(path = %data_dir, "Opening RocksDB store");
    let store = Arc::new(RocksStore::open(&data_dir)?);

    // Initialize the report desk
    let desk = Arc::new(ReportDeskService::with_defaults(store));
    tracing::info!("Report desk initialized");

    // Initialize JWT validator
    #[cfg(feature = "dev-mode")]
    let validator = {
        tracing::warn!("DEV MODE ENABLED - using mock JWT validator");
        tracing::warn!("Use tokens in format: test-token:<user-uuid>:<role>");
        Arc::new(MockTokenValidator)
    };

    #[cfg(not(feature = "dev-mode"))]
    let validator = {
        let auth_config = AuthConfig {
            issuer: std::env::var("AUTH_ISSUER").unwrap_or_else(|_| "vigil-portal".into()),
            audience: std::env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "vigil-api".into()),
            secret: std::env::var("AUTH_SECRET")?,
        };
        Arc::new(HmacValidator::new(&auth_config))
    };
    tracing::info!("JWT validator initialized");

    // Build gateway state and configuration
    let gateway_config = GatewayConfig::default();
    let state = GatewayState::new(desk, validator, gateway_config);

    // Create the full router with all API endpoints
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
