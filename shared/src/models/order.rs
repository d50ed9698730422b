//! Order and OrderLine models

use serde::{Deserialize, Serialize};

/// Per-line fulfillment status.
///
/// Independent of the order-level release flags; consistency between the two
/// is read-derived, never enforced transactionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    Pending,
    Allocated,
    Picked,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl LineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Allocated => "allocated",
            Self::Picked => "picked",
            Self::Packed => "packed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Order entity
///
/// Created by the upstream ingestion/Shopify-sync process. The ops server
/// mutates only `notes` and the admin release flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    /// Upstream status literal (`open`, `closed`, ...); the release flags
    /// below are the authoritative lifecycle signals.
    pub status: String,
    pub order_date: i64,
    pub ship_by_date: Option<i64>,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    /// Serialized shipping address (JSON text); decoded leniently
    pub shipping_address: Option<String>,
    pub total_amount: f64,
    /// Lowercased payment method (`cod` or gateway name)
    pub payment_method: Option<String>,
    pub sales_channel: Option<String>,
    pub notes: Option<String>,
    pub is_archived: bool,
    pub released_to_shipped: bool,
    pub released_to_cancelled: bool,
    pub is_exchange: bool,
    pub exchange_of_order_id: Option<i64>,
    pub cod_remitted_at: Option<i64>,
    pub shipped_at: Option<i64>,
    pub archived_at: Option<i64>,
    pub created_at: i64,
}

/// Order line entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub sku_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_status: LineStatus,
    pub awb_number: Option<String>,
    pub courier: Option<String>,
    pub shipped_at: Option<i64>,
    pub delivered_at: Option<i64>,
    /// Courier tracking status string; the RTO/terminal sets are matched on
    /// the normalized lowercase value
    pub tracking_status: Option<String>,
    pub last_scan_at: Option<i64>,
    pub last_scan_location: Option<String>,
    pub rto_initiated_at: Option<i64>,
    pub rto_received_at: Option<i64>,
    pub return_status: Option<String>,
    pub return_quantity: Option<i64>,
    pub return_reason: Option<String>,
    pub return_resolution: Option<String>,
    pub refund_amount: Option<f64>,
    pub exchange_order_id: Option<i64>,
    pub production_batch_id: Option<i64>,
    /// Bespoke SKU flag; customized lines are non-returnable by policy
    pub is_custom: bool,
}

/// Order line joined with its catalog context (for the grid flattener)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLineDetail {
    pub id: i64,
    pub order_id: i64,
    pub sku_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_status: LineStatus,
    pub awb_number: Option<String>,
    pub courier: Option<String>,
    pub shipped_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub tracking_status: Option<String>,
    pub last_scan_at: Option<i64>,
    pub last_scan_location: Option<String>,
    pub rto_initiated_at: Option<i64>,
    pub rto_received_at: Option<i64>,
    pub return_status: Option<String>,
    pub return_quantity: Option<i64>,
    pub is_custom: bool,
    // Catalog context
    pub sku_code: String,
    pub sku_size: Option<String>,
    pub mrp: f64,
    pub variation_colour: Option<String>,
    pub variation_image_url: Option<String>,
    pub product_name: String,
    /// Sum of BOM line costs per unit; None when the SKU has no BOM
    pub bom_cost: Option<f64>,
    pub fabric_colour_name: Option<String>,
    /// Tri-state: None = no BOM fabric link, Some(flag) = linked
    pub fabric_out_of_stock: Option<bool>,
    pub batch_code: Option<String>,
    pub batch_status: Option<String>,
}

/// Cached Shopify snapshot for an order (written by the sync worker)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShopifyOrderCache {
    pub order_id: i64,
    pub fulfillment_status: Option<String>,
    /// JSON array of discount code strings
    pub discount_codes: Option<String>,
    pub tags: Option<String>,
    pub tracking_company: Option<String>,
    pub tracking_number: Option<String>,
    pub synced_at: i64,
}
