//! Admin User API Module
//!
//! All routes require an admin-level role.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/users", get(handler::list).post(handler::create))
        .route(
            "/users/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/users/{id}/overrides",
            get(handler::get_overrides).put(handler::put_overrides),
        )
        .route("/permissions", get(handler::get_all_permissions))
        .layer(middleware::from_fn(require_admin))
}
