//! Dashboard endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use vigil_auth::TokenValidator;
use vigil_desk::ReportDesk;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::GatewayState;

/// Aggregate statistics for the portal dashboard.
///
/// Available to any authenticated role. The numbers are portal-wide; the
/// recent-reports list is filtered to what the caller may read.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub async fn get_dashboard<D, V>(
    State(state): State<Arc<GatewayState<D, V>>>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError>
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    let stats = state.desk.dashboard(&user.actor()).await?;

    Ok(Json(stats))
}
