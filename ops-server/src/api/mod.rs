//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - login / current user
//! - [`orders`] - order listing, detail, unified search
//! - [`search`] - cross-bucket search aggregator
//! - [`analytics`] - dashboard snapshot
//! - [`admin_users`] - account and permission-override management
//! - [`channels`] - sales channels
//! - [`tiers`] - customer tier thresholds
//! - [`preferences`] - grid column layouts
//! - [`tables`] - admin table inspection / clear
//! - [`jobs`] - background-job control (proxied)
//! - [`logs`] - worker log history (proxied)
//! - [`shopify`] - Shopify config and sync (proxied)

pub mod admin_users;
pub mod analytics;
pub mod auth;
pub mod channels;
pub mod health;
pub mod jobs;
pub mod logs;
pub mod orders;
pub mod preferences;
pub mod search;
pub mod shopify;
pub mod tables;
pub mod tiers;

use axum::Router;

use crate::core::ServerState;

/// Compose the full API router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(orders::router())
        .merge(search::router())
        .merge(analytics::router())
        .merge(admin_users::router())
        .merge(channels::router())
        .merge(tiers::router())
        .merge(preferences::router())
        .merge(tables::router())
        .merge(jobs::router())
        .merge(logs::router())
        .merge(shopify::router())
        .with_state(state)
}
