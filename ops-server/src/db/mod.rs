//! Database Module
//!
//! Handles the SQLite connection pool and migrations.

pub mod repository;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

use crate::auth::password;
use shared::AppError;
use shared::models::AdminRole;
use shared::util::now_millis;

/// Embedded migrations, shared with the in-memory test pools
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Create a new database service with WAL mode and a bounded pool
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        // busy_timeout: wait 5s on write contention instead of failing
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Seed the initial owner account when the user table is empty.
    ///
    /// Credentials come from `OPS_ADMIN_EMAIL` / `OPS_ADMIN_PASSWORD`; with
    /// neither set the server starts with no accounts and logs a warning.
    pub async fn seed_initial_admin(&self) -> Result<(), AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_user")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        if count > 0 {
            return Ok(());
        }

        let (Ok(email), Ok(pass)) = (
            std::env::var("OPS_ADMIN_EMAIL"),
            std::env::var("OPS_ADMIN_PASSWORD"),
        ) else {
            tracing::warn!(
                "No admin accounts and OPS_ADMIN_EMAIL/OPS_ADMIN_PASSWORD unset; login is impossible"
            );
            return Ok(());
        };

        let hash = password::hash_password(&pass)
            .map_err(|e| AppError::internal(format!("Failed to hash seed password: {e}")))?;
        sqlx::query(
            "INSERT INTO admin_user (id, email, display_name, hash_pass, role, is_active, token_version, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 1, 0, ?6)",
        )
        .bind(shared::util::snowflake_id())
        .bind(&email)
        .bind("Owner")
        .bind(&hash)
        .bind(AdminRole::Owner)
        .bind(now_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(email = %email, "Seeded initial owner account");
        Ok(())
    }
}
