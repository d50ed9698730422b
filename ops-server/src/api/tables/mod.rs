//! Table Inspection API Module
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
    Router::new()
        .route("/api/admin/tables", get(handler::list_tables))
        .route("/api/admin/tables/clear", post(handler::clear))
        .route("/api/admin/tables/{name}", get(handler::get_table))
        .layer(middleware::from_fn(require_admin))
}
