//! Order API Module
//!
//! Read-only access to orders. All mutations happen in the upstream
//! ingestion/sync worker.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(handler::list))
        .route("/api/orders/search-unified", get(handler::search_unified))
        .route("/api/orders/number/{order_number}", get(handler::get_by_number))
        .route("/api/orders/{id}", get(handler::get_by_id))
}
