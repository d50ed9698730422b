//! Sales Channel API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/channels", get(handler::list).put(handler::replace))
}
