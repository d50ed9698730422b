//! Grid Preference API Handlers
//!
//! Per-user grid column layouts with an admin-maintained default. Stored as
//! JSON text, validated as an array on write, decoded leniently on read.

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::settings;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppResult, ok};
use shared::{ApiResponse, AppError, ErrorCode};

/// Columns for one grid, already resolved through the fallback chain
#[derive(Debug, Serialize)]
pub struct GridColumns {
    pub grid: String,
    /// Decoded column list; a malformed stored value degrades to empty
    pub columns: serde_json::Value,
}

fn decode_columns(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::Array(vec![]))
}

/// GET /api/preferences/grid/{grid} — own row, else admin default, else empty
pub async fn get(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(grid): Path<String>,
) -> AppResult<Json<ApiResponse<GridColumns>>> {
    validate_required_text(&grid, "grid", MAX_NAME_LEN)?;
    let raw = settings::grid_columns_effective(&state.pool, current_user.id, &grid)
        .await
        .map_err(AppError::from)?;
    Ok(ok(GridColumns {
        grid,
        columns: decode_columns(&raw),
    }))
}

/// PUT /api/preferences/grid/{grid} — store the caller's own layout
pub async fn put(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(grid): Path<String>,
    Json(columns): Json<serde_json::Value>,
) -> AppResult<Json<ApiResponse<GridColumns>>> {
    validate_required_text(&grid, "grid", MAX_NAME_LEN)?;
    let raw = serde_json::to_string(&columns)
        .map_err(|e| AppError::internal(format!("Failed to encode columns: {e}")))?;
    settings::grid_pref_put(&state.pool, Some(current_user.id), &grid, &raw)
        .await
        .map_err(AppError::from)?;
    Ok(ok(GridColumns { grid, columns }))
}

/// PUT /api/preferences/grid/{grid}/default — admin-maintained default layout
pub async fn put_default(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(grid): Path<String>,
    Json(columns): Json<serde_json::Value>,
) -> AppResult<Json<ApiResponse<GridColumns>>> {
    if !current_user.is_admin() {
        return Err(AppError::new(ErrorCode::AdminRequired));
    }
    validate_required_text(&grid, "grid", MAX_NAME_LEN)?;
    let raw = serde_json::to_string(&columns)
        .map_err(|e| AppError::internal(format!("Failed to encode columns: {e}")))?;
    settings::grid_pref_put(&state.pool, None, &grid, &raw)
        .await
        .map_err(AppError::from)?;
    Ok(ok(GridColumns { grid, columns }))
}
