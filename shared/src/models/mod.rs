//! Domain models
//!
//! Entities as persisted by the upstream ingestion/sync process and read by
//! the ops server. All timestamps are Unix milliseconds (i64); civil-date
//! conversion happens at the API layer.

mod admin_user;
mod catalog;
mod customer;
mod order;
mod settings;

pub use admin_user::{
    AdminRole, AdminUser, AdminUserCreate, AdminUserResponse, AdminUserUpdate, OverrideMode,
    PermissionOverride, PermissionOverrideSet, effective_permissions,
};
pub use catalog::{BomLine, FabricColour, Product, ProductionBatch, Sku, Variation};
pub use customer::Customer;
pub use order::{LineStatus, Order, OrderLine, OrderLineDetail, ShopifyOrderCache};
pub use settings::{GridPreference, SalesChannel, SystemSetting, TierThresholds};
