//! Reference counter administration endpoints.
//!
//! Counters are an operator surface: reading one is a diagnostic, and a
//! reset moves where the next reference continues from. Both are admin
//! only; the desk enforces the role.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use vigil_auth::TokenValidator;
use vigil_core::Category;
use vigil_desk::ReportDesk;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::reports::parse_category;
use crate::state::GatewayState;

/// Response for a counter read.
#[derive(Debug, Serialize)]
pub struct CounterResponse {
    /// Category the counter belongs to.
    pub category: Category,
    /// Last issued sequence number (0 if none issued yet).
    pub count: u64,
}

/// Request to reset a counter.
#[derive(Debug, Deserialize)]
pub struct ResetCounterBody {
    /// New counter value; the next reference is `value + 1`. Defaults to 0,
    /// restarting the sequence.
    #[serde(default)]
    pub value: u64,
}

/// Read a category's reference counter.
///
/// The value is a point-in-time snapshot and may be stale by the time the
/// response is read.
///
/// # Errors
///
/// Returns an error if the category is unknown or the actor is not an
/// admin.
pub async fn get_counter<D, V>(
    State(state): State<Arc<GatewayState<D, V>>>,
    user: AuthUser,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    let category = parse_category(&category)?;
    let count = state.desk.reference_count(&user.actor(), category).await?;

    Ok(Json(CounterResponse { category, count }))
}

/// Reset a category's reference counter.
///
/// Resetting below the high-water mark re-issues references; the endpoint
/// does not guard against that.
///
/// # Errors
///
/// Returns an error if the category is unknown or the actor is not an
/// admin.
pub async fn reset_counter<D, V>(
    State(state): State<Arc<GatewayState<D, V>>>,
    user: AuthUser,
    Path(category): Path<String>,
    Json(body): Json<ResetCounterBody>,
) -> Result<impl IntoResponse, ApiError>
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    let category = parse_category(&category)?;
    state
        .desk
        .reset_reference_count(&user.actor(), category, body.value)
        .await?;

    Ok(Json(CounterResponse {
        category,
        count: body.value,
    }))
}
