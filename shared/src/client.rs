//! Client-related types shared between server and clients
//!
//! Common request/response types used in API communication, plus the typed
//! contracts of the sibling worker service (logs, background jobs, Shopify
//! sync) the ops server proxies to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

// =============================================================================
// Worker service contracts
// =============================================================================

/// Background job identifiers the ops server may trigger.
///
/// The allow-list is closed: anything else is rejected before a proxy call
/// is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobId {
    ShopifySync,
    TrackingSync,
    CacheCleanup,
    SheetIngest,
}

impl JobId {
    pub const ALL: [JobId; 4] = [
        JobId::ShopifySync,
        JobId::TrackingSync,
        JobId::CacheCleanup,
        JobId::SheetIngest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShopifySync => "shopify_sync",
            Self::TrackingSync => "tracking_sync",
            Self::CacheCleanup => "cache_cleanup",
            Self::SheetIngest => "sheet_ingest",
        }
    }
}

/// Error for job ids outside the allow-list
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown job id: {0}")]
pub struct UnknownJobId(pub String);

impl FromStr for JobId {
    type Err = UnknownJobId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shopify_sync" => Ok(Self::ShopifySync),
            "tracking_sync" => Ok(Self::TrackingSync),
            "cache_cleanup" => Ok(Self::CacheCleanup),
            "sheet_ingest" => Ok(Self::SheetIngest),
            other => Err(UnknownJobId(other.to_string())),
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One log line from the worker process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: i64,
    pub level: String,
    pub target: Option<String>,
    pub message: String,
}

/// Log query forwarded to the worker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogQuery {
    pub level: Option<String>,
    pub limit: Option<u32>,
    pub job: Option<JobId>,
}

/// One recorded worker run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRun {
    pub id: i64,
    pub job: JobId,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub status: String,
    pub items_processed: Option<i64>,
    pub error: Option<String>,
}

/// Aggregate worker statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerStats {
    pub runs_total: i64,
    pub runs_failed: i64,
    pub last_run_at: Option<i64>,
    pub jobs_enabled: Vec<JobId>,
}

/// Result of a job start/cancel/enable call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobActionResponse {
    pub job: JobId,
    pub accepted: bool,
    pub message: Option<String>,
}

/// Shopify connection configuration held by the worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyConfig {
    pub shop_domain: String,
    pub api_version: String,
    /// Masked on reads; only set on updates
    pub access_token: Option<String>,
    pub sync_interval_minutes: u32,
}

/// Result of a Shopify test-connection call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyConnectionStatus {
    pub connected: bool,
    pub shop_name: Option<String>,
    pub error: Option<String>,
}
