use chrono_tz::Tz;

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// All items can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 4000 | HTTP API port |
/// | DATABASE_PATH | data/hemline.db | SQLite database file |
/// | BUSINESS_TIMEZONE | Asia/Kolkata | Civil timezone for analytics periods |
/// | WORKER_URL | http://localhost:4100 | Sibling worker service base URL |
/// | ENVIRONMENT | development | Running environment |
/// | LOG_LEVEL | info | Tracing level |
/// | LOG_DIR | (none) | Daily-rolling log file directory |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Business civil timezone; all analytics period boundaries are computed
    /// here, then converted to UTC millis for querying
    pub timezone: Tz,
    /// Base URL of the sibling worker process (logs, jobs, Shopify sync)
    pub worker_url: String,
    /// JWT auth configuration
    pub jwt: JwtConfig,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Tracing level
    pub log_level: String,
    /// Optional rolling-file log directory
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let timezone = std::env::var("BUSINESS_TIMEZONE")
            .ok()
            .and_then(|name| match name.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(_) => {
                    tracing::warn!("Unknown BUSINESS_TIMEZONE '{}', using Asia/Kolkata", name);
                    None
                }
            })
            .unwrap_or(chrono_tz::Asia::Kolkata);

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/hemline.db".into()),
            timezone,
            worker_url: std::env::var("WORKER_URL")
                .unwrap_or_else(|_| "http://localhost:4100".into()),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override database path and port, commonly for tests
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
