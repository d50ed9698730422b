//! Search API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::listing::filter::MAX_BUCKET_RESULTS;
use crate::listing::search::{SearchAllResults, search_all};
use crate::utils::validation::{MAX_SEARCH_LEN, MIN_SEARCH_LEN};
use crate::utils::{AppResult, ok};
use shared::{ApiResponse, AppError, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_cap")]
    pub cap: u32,
}

fn default_cap() -> u32 {
    MAX_BUCKET_RESULTS
}

/// GET /api/search — run the query against every bucket concurrently
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchAllResults>>> {
    let term = query.q.trim();
    if term.len() < MIN_SEARCH_LEN {
        return Err(AppError::with_message(
            ErrorCode::SearchTooShort,
            format!("Search query must be at least {MIN_SEARCH_LEN} characters"),
        ));
    }
    if term.len() > MAX_SEARCH_LEN {
        return Err(AppError::validation("Search query too long"));
    }

    let results = search_all(&state.pool, term, query.cap)
        .await
        .map_err(AppError::from)?;
    Ok(ok(results))
}
