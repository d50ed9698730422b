//! Background Job API Handlers
//!
//! Pure pass-through to the worker process. The job id is parsed against
//! the allow-list before any proxy call is made; the caller's token is
//! forwarded as-is.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::auth::{AuthToken, CurrentUser};
use crate::core::ServerState;
use crate::utils::{AppResult, ok};
use shared::client::{JobActionResponse, JobId, WorkerRun, WorkerStats};
use shared::{ApiResponse, AppError, ErrorCode};

fn parse_job(raw: &str) -> AppResult<JobId> {
    raw.parse::<JobId>().map_err(|e| {
        AppError::with_message(ErrorCode::UnknownJob, e.to_string())
    })
}

#[derive(Debug, Deserialize)]
pub struct RunsQuery {
    pub job: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

/// GET /api/jobs/runs — worker run history
pub async fn runs(
    State(state): State<ServerState>,
    Extension(AuthToken(token)): Extension<AuthToken>,
    Query(query): Query<RunsQuery>,
) -> AppResult<Json<ApiResponse<Vec<WorkerRun>>>> {
    let job = query.job.as_deref().map(parse_job).transpose()?;
    let runs = state.worker.worker_runs(&token, job, query.limit).await?;
    Ok(ok(runs))
}

/// GET /api/jobs/stats — aggregate worker statistics
pub async fn stats(
    State(state): State<ServerState>,
    Extension(AuthToken(token)): Extension<AuthToken>,
) -> AppResult<Json<ApiResponse<WorkerStats>>> {
    let stats = state.worker.worker_stats(&token).await?;
    Ok(ok(stats))
}

/// POST /api/jobs/{job}/start
pub async fn start(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Extension(AuthToken(token)): Extension<AuthToken>,
    Path(job): Path<String>,
) -> AppResult<Json<ApiResponse<JobActionResponse>>> {
    let job = parse_job(&job)?;
    tracing::info!(actor = current_user.id, job = %job, "Starting background job");
    let response = state.worker.job_start(&token, job).await?;
    Ok(ok(response))
}

/// POST /api/jobs/{job}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Extension(AuthToken(token)): Extension<AuthToken>,
    Path(job): Path<String>,
) -> AppResult<Json<ApiResponse<JobActionResponse>>> {
    let job = parse_job(&job)?;
    tracing::info!(actor = current_user.id, job = %job, "Cancelling background job");
    let response = state.worker.job_cancel(&token, job).await?;
    Ok(ok(response))
}

#[derive(Debug, Deserialize)]
pub struct EnableRequest {
    pub enabled: bool,
}

/// POST /api/jobs/{job}/enable
pub async fn enable(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Extension(AuthToken(token)): Extension<AuthToken>,
    Path(job): Path<String>,
    Json(payload): Json<EnableRequest>,
) -> AppResult<Json<ApiResponse<JobActionResponse>>> {
    let job = parse_job(&job)?;
    tracing::info!(
        actor = current_user.id,
        job = %job,
        enabled = payload.enabled,
        "Toggling background job"
    );
    let response = state.worker.job_enable(&token, job, payload.enabled).await?;
    Ok(ok(response))
}
