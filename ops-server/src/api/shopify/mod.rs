//! Shopify API Module (proxied)
//!
//! All routes require an admin-level role.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shopify", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/config", get(handler::get_config).put(handler::put_config))
        .route("/test-connection", post(handler::test_connection))
        .route("/sync", post(handler::sync))
        .layer(middleware::from_fn(require_admin))
}
