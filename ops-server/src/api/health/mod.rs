//! Health Check API

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::AppError;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
}

/// GET /api/health — liveness plus a database ping
async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthStatus>> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(HealthStatus {
        status: "ok",
        database: "ok",
    }))
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}
