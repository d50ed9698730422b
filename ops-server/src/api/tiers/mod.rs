//! Customer Tier API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/tiers", get(handler::get).put(handler::put))
}
