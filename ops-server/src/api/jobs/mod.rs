//! Background Job API Module
//!
//! Run history and stats are visible to any authenticated user; the
//! start/cancel/enable controls are admin-only.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let controls = Router::new()
        .route("/{job}/start", post(handler::start))
        .route("/{job}/cancel", post(handler::cancel))
        .route("/{job}/enable", post(handler::enable))
        .layer(middleware::from_fn(require_admin));

    let reads = Router::new()
        .route("/runs", get(handler::runs))
        .route("/stats", get(handler::stats));

    Router::new().nest("/api/jobs", reads.merge(controls))
}
