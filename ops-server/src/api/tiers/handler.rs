//! Customer Tier API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::settings;
use crate::utils::{AppResult, ok};
use shared::models::TierThresholds;
use shared::{ApiResponse, AppError, ErrorCode};

/// GET /api/tiers — configured spend thresholds (lenient decode)
pub async fn get(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<TierThresholds>>> {
    let thresholds = settings::tier_thresholds_get(&state.pool)
        .await
        .map_err(AppError::from)?;
    Ok(ok(thresholds))
}

/// PUT /api/tiers — update thresholds (admin only)
pub async fn put(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<TierThresholds>,
) -> AppResult<Json<ApiResponse<TierThresholds>>> {
    if !current_user.is_admin() {
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    tracing::info!(actor = current_user.id, "Updating tier thresholds");

    let thresholds = settings::tier_thresholds_put(&state.pool, &payload)
        .await
        .map_err(AppError::from)?;
    Ok(ok(thresholds))
}
