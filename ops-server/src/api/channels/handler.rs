//! Sales Channel API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::settings::{self, ChannelUpsert};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppResult, ok};
use shared::models::SalesChannel;
use shared::{ApiResponse, AppError, ErrorCode};

/// GET /api/channels
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<SalesChannel>>>> {
    let channels = settings::channels_find_all(&state.pool)
        .await
        .map_err(AppError::from)?;
    Ok(ok(channels))
}

/// PUT /api/channels — replace the channel set
pub async fn replace(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<Vec<ChannelUpsert>>,
) -> AppResult<Json<ApiResponse<Vec<SalesChannel>>>> {
    if !current_user.is_admin() {
        return Err(AppError::new(ErrorCode::AdminRequired));
    }
    for ch in &payload {
        validate_required_text(&ch.name, "channel name", MAX_NAME_LEN)?;
    }

    tracing::info!(
        actor = current_user.id,
        channels = payload.len(),
        "Replacing sales channels"
    );

    let channels = settings::channels_replace(&state.pool, &payload)
        .await
        .map_err(AppError::from)?;
    Ok(ok(channels))
}
