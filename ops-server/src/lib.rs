//! Hemline Ops Server — order-management back office
//!
//! # Architecture overview
//!
//! - **Listing pipeline** (`listing`): order view filters, the grid row
//!   flattener, and the cross-bucket search aggregator
//! - **Analytics** (`analytics`): dashboard snapshot aggregation
//! - **Database** (`db`): SQLite pool, migrations, repositories
//! - **Auth** (`auth`): JWT + Argon2 with token-version revocation
//! - **Worker proxy** (`worker`): typed client for the sibling sync process
//! - **HTTP API** (`api`): RESTful routes and handlers
//!
//! # Module structure
//!
//! ```text
//! ops-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, permissions
//! ├── api/           # HTTP routes and handlers
//! ├── listing/       # order filter/flatten/search pipeline
//! ├── analytics/     # dashboard snapshot
//! ├── worker/        # typed worker-service client
//! ├── db/            # database layer
//! └── utils/         # helpers
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod listing;
pub mod utils;
pub mod worker;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured events on the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
    ($level:expr, $event:expr) => {
        tracing::info!(target: "security", level = $level, event = $event);
    };
}
