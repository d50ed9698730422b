//! Grid Preference API Module

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/preferences/grid/{grid}",
            get(handler::get).put(handler::put),
        )
        .route(
            "/api/preferences/grid/{grid}/default",
            put(handler::put_default),
        )
}
