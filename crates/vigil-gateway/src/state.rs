//! Gateway application state.

use std::sync::Arc;

use vigil_auth::TokenValidator;
use vigil_desk::ReportDesk;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
///
/// This struct holds references to all services needed by the HTTP handlers.
pub struct GatewayState<D, V>
where
    D: ReportDesk,
    V: TokenValidator,
{
    /// The report desk for submission and workflow operations.
    pub desk: Arc<D>,
    /// The JWT validator for authentication.
    pub validator: Arc<V>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<D, V> GatewayState<D, V>
where
    D: ReportDesk,
    V: TokenValidator,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(desk: Arc<D>, validator: Arc<V>, config: GatewayConfig) -> Self {
        Self {
            desk,
            validator,
            config,
        }
    }
}

impl<D, V> Clone for GatewayState<D, V>
where
    D: ReportDesk,
    V: TokenValidator,
{
    fn clone(&self) -> Self {
        Self {
            desk: Arc::clone(&self.desk),
            validator: Arc::clone(&self.validator),
            config: self.config.clone(),
        }
    }
}
