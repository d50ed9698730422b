//! Table Inspection API Handlers
//!
//! Admin-only, registry-dispatched table reads and the clear-tables danger
//! operation.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::inspect::{
    self, CLEAR_CONFIRMATION_PHRASE, TableName, TablePage,
};
use crate::security_log;
use crate::utils::{AppResult, ok};
use shared::{ApiResponse, AppError, ErrorCode};

/// GET /api/admin/tables — the inspectable-table registry
pub async fn list_tables() -> AppResult<Json<ApiResponse<Vec<&'static str>>>> {
    Ok(ok(TableName::ALL.iter().map(TableName::as_str).collect()))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/admin/tables/{name} — one page of a registered table
pub async fn get_table(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<TablePage>>> {
    let table: TableName = name.parse().map_err(AppError::from)?;
    let page = inspect::table_page(&state.pool, table, query.limit, query.offset)
        .await
        .map_err(AppError::from)?;
    Ok(ok(page))
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    pub confirmation: String,
}

#[derive(Debug, Serialize)]
pub struct ClearedTable {
    pub table: TableName,
    pub deleted: u64,
}

/// POST /api/admin/tables/clear — delete all order/catalog/customer data.
///
/// Requires the literal confirmation phrase; deletes child rows before
/// parent rows inside one transaction.
pub async fn clear(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ClearRequest>,
) -> AppResult<Json<ApiResponse<Vec<ClearedTable>>>> {
    if payload.confirmation != CLEAR_CONFIRMATION_PHRASE {
        return Err(AppError::with_message(
            ErrorCode::ConfirmationMismatch,
            format!("Type '{CLEAR_CONFIRMATION_PHRASE}' to confirm"),
        ));
    }

    security_log!(
        "WARN",
        "clear_tables",
        user_id = current_user.id,
        email = current_user.email.clone()
    );

    let report = inspect::clear_tables(&state.pool)
        .await
        .map_err(AppError::from)?;
    Ok(ok(report
        .into_iter()
        .map(|(table, deleted)| ClearedTable { table, deleted })
        .collect()))
}
