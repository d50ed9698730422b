//! Catalog Models
//!
//! Three-level hierarchy: Product → Variation (colour) → SKU (size), with an
//! optional bill of materials per SKU referencing fabric colours.

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
}

/// Variation entity (one colour of a product)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Variation {
    pub id: i64,
    pub product_id: i64,
    pub colour: Option<String>,
    pub image_url: Option<String>,
}

/// SKU entity (one size of a variation)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Sku {
    pub id: i64,
    pub variation_id: i64,
    pub code: String,
    pub size: Option<String>,
    /// Maximum retail (list) price, contrasted with the selling unit price
    pub mrp: f64,
    pub stock_on_hand: i64,
    pub is_custom: bool,
}

/// Fabric colour with its own stock balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FabricColour {
    pub id: i64,
    pub name: String,
    pub stock_metres: f64,
    pub is_out_of_stock: bool,
}

/// Bill-of-materials line: fabric consumed to produce one unit of a SKU
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BomLine {
    pub id: i64,
    pub sku_id: i64,
    pub fabric_colour_id: i64,
    pub metres_per_unit: f64,
    pub cost_per_unit: f64,
}

/// Manufacturing batch an order line may be assigned to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductionBatch {
    pub id: i64,
    pub code: String,
    pub status: String,
}
