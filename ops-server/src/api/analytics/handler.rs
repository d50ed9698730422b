//! Analytics API Handlers

use axum::{Json, extract::State};

use crate::analytics::{AnalyticsSnapshot, snapshot};
use crate::core::ServerState;
use crate::utils::{AppResult, ok};
use shared::ApiResponse;
use shared::util::now_millis;

/// GET /api/analytics — dashboard snapshot
///
/// Database errors propagate; this endpoint never serves partial numbers.
pub async fn get_snapshot(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<AnalyticsSnapshot>>> {
    let snap = snapshot(&state.pool, state.config.timezone, now_millis()).await?;
    Ok(ok(snap))
}
