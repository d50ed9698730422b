//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer aggregate profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub shopify_customer_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub lifetime_value: f64,
    pub order_count: i64,
    pub rto_count: i64,
    /// Tier label (platinum/gold/silver), recomputed by the sync worker from
    /// the configured thresholds
    pub tier: Option<String>,
    /// Free text; MAY contain a JSON array of tags, else comma-separated
    pub tags: Option<String>,
    pub created_at: i64,
}
