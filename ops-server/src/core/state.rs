use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::worker::WorkerClient;

/// Server state — shared handles for every request
///
/// Cloning is shallow (pool and services are reference-counted); one value is
/// constructed at startup and injected into the router.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Immutable configuration |
/// | pool | SQLite connection pool (bounded, opened at startup) |
/// | jwt_service | Token mint/validate service |
/// | worker | Typed client for the sibling worker process |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub worker: WorkerClient,
}

impl ServerState {
    pub fn new(
        config: Config,
        pool: SqlitePool,
        jwt_service: Arc<JwtService>,
        worker: WorkerClient,
    ) -> Self {
        Self {
            config,
            pool,
            jwt_service,
            worker,
        }
    }

    /// Initialize server state: open the database, apply migrations, seed
    /// the initial account, and construct services.
    pub async fn initialize(config: &Config) -> Result<Self, shared::AppError> {
        if let Some(parent) = std::path::Path::new(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                shared::AppError::internal(format!("Failed to create data directory: {e}"))
            })?;
        }

        let db = DbService::new(&config.database_path).await?;
        db.seed_initial_admin().await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let worker = WorkerClient::new(&config.worker_url);

        Ok(Self::new(config.clone(), db.pool, jwt_service, worker))
    }
}
