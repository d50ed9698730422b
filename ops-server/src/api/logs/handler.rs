//! Log API Handlers (proxied)

use axum::{
    Json,
    extract::{Extension, Query, State},
};
use serde::Deserialize;

use crate::auth::AuthToken;
use crate::core::ServerState;
use crate::utils::{AppResult, ok};
use shared::client::{LogEntry, LogQuery};
use shared::{ApiResponse, AppError, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub level: Option<String>,
    pub limit: Option<u32>,
    pub job: Option<String>,
}

/// GET /api/logs — forwarded to the worker process
pub async fn list(
    State(state): State<ServerState>,
    Extension(AuthToken(token)): Extension<AuthToken>,
    Query(query): Query<LogsQuery>,
) -> AppResult<Json<ApiResponse<Vec<LogEntry>>>> {
    let job = query
        .job
        .as_deref()
        .map(|raw| {
            raw.parse()
                .map_err(|e| AppError::with_message(ErrorCode::UnknownJob, format!("{e}")))
        })
        .transpose()?;

    let entries = state
        .worker
        .logs(
            &token,
            &LogQuery {
                level: query.level,
                limit: query.limit,
                job,
            },
        )
        .await?;
    Ok(ok(entries))
}
