//! Table inspection and the clear-tables danger operation
//!
//! Ad-hoc inspection dispatches through a closed registry: each table name
//! maps to a typed query, and anything outside the registry is rejected.
//! The admin-user projection never exposes the password hash.

use serde::Serialize;
use sqlx::SqlitePool;
use std::str::FromStr;

use super::{RepoError, RepoResult};
use shared::ErrorCode;
use shared::models::{
    AdminUserResponse, BomLine, Customer, FabricColour, GridPreference, Order, OrderLine,
    PermissionOverride, Product, ProductionBatch, SalesChannel, ShopifyOrderCache, Sku,
    SystemSetting, Variation,
};

/// The confirmation phrase the clear-tables operation demands, verbatim
pub const CLEAR_CONFIRMATION_PHRASE: &str = "clear all order data";

/// Closed registry of inspectable tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Customer,
    Product,
    Variation,
    Sku,
    FabricColour,
    BomLine,
    ProductionBatch,
    Orders,
    OrderLine,
    ShopifyOrderCache,
    AdminUser,
    PermissionOverride,
    SalesChannel,
    SystemSetting,
    GridPreference,
}

impl TableName {
    pub const ALL: [TableName; 15] = [
        TableName::Customer,
        TableName::Product,
        TableName::Variation,
        TableName::Sku,
        TableName::FabricColour,
        TableName::BomLine,
        TableName::ProductionBatch,
        TableName::Orders,
        TableName::OrderLine,
        TableName::ShopifyOrderCache,
        TableName::AdminUser,
        TableName::PermissionOverride,
        TableName::SalesChannel,
        TableName::SystemSetting,
        TableName::GridPreference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Product => "product",
            Self::Variation => "variation",
            Self::Sku => "sku",
            Self::FabricColour => "fabric_colour",
            Self::BomLine => "bom_line",
            Self::ProductionBatch => "production_batch",
            Self::Orders => "orders",
            Self::OrderLine => "order_line",
            Self::ShopifyOrderCache => "shopify_order_cache",
            Self::AdminUser => "admin_user",
            Self::PermissionOverride => "permission_override",
            Self::SalesChannel => "sales_channel",
            Self::SystemSetting => "system_setting",
            Self::GridPreference => "grid_preference",
        }
    }
}

impl FromStr for TableName {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                RepoError::Business(ErrorCode::UnknownTable, format!("Unknown table: {s}"))
            })
    }
}

/// One inspected page of a table
#[derive(Debug, Serialize)]
pub struct TablePage {
    pub table: TableName,
    pub total: i64,
    pub rows: serde_json::Value,
}

async fn fetch_json<T>(pool: &SqlitePool, sql: &str, limit: i64, offset: i64) -> RepoResult<serde_json::Value>
where
    T: Serialize + Send + Unpin + for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow>,
{
    let rows: Vec<T> = sqlx::query_as::<_, T>(sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    serde_json::to_value(rows)
        .map_err(|e| RepoError::Database(format!("Failed to serialize rows: {e}")))
}

/// Read one page of a registered table, dispatched to its typed query.
pub async fn table_page(
    pool: &SqlitePool,
    table: TableName,
    limit: i64,
    offset: i64,
) -> RepoResult<TablePage> {
    let limit = limit.clamp(1, 500);
    let offset = offset.max(0);

    let sql = format!(
        "SELECT * FROM {} ORDER BY 1 LIMIT ?1 OFFSET ?2",
        table.as_str()
    );

    let rows = match table {
        TableName::Customer => fetch_json::<Customer>(pool, &sql, limit, offset).await?,
        TableName::Product => fetch_json::<Product>(pool, &sql, limit, offset).await?,
        TableName::Variation => fetch_json::<Variation>(pool, &sql, limit, offset).await?,
        TableName::Sku => fetch_json::<Sku>(pool, &sql, limit, offset).await?,
        TableName::FabricColour => fetch_json::<FabricColour>(pool, &sql, limit, offset).await?,
        TableName::BomLine => fetch_json::<BomLine>(pool, &sql, limit, offset).await?,
        TableName::ProductionBatch => {
            fetch_json::<ProductionBatch>(pool, &sql, limit, offset).await?
        }
        TableName::Orders => fetch_json::<Order>(pool, &sql, limit, offset).await?,
        TableName::OrderLine => fetch_json::<OrderLine>(pool, &sql, limit, offset).await?,
        TableName::ShopifyOrderCache => {
            fetch_json::<ShopifyOrderCache>(pool, &sql, limit, offset).await?
        }
        // Projection without hash_pass
        TableName::AdminUser => {
            let sql = "SELECT id, email, display_name, role, is_active, created_at \
                       FROM admin_user ORDER BY 1 LIMIT ?1 OFFSET ?2";
            fetch_json::<AdminUserResponse>(pool, sql, limit, offset).await?
        }
        TableName::PermissionOverride => {
            fetch_json::<PermissionOverride>(pool, &sql, limit, offset).await?
        }
        TableName::SalesChannel => fetch_json::<SalesChannel>(pool, &sql, limit, offset).await?,
        TableName::SystemSetting => fetch_json::<SystemSetting>(pool, &sql, limit, offset).await?,
        TableName::GridPreference => {
            fetch_json::<GridPreference>(pool, &sql, limit, offset).await?
        }
    };

    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table.as_str()))
        .fetch_one(pool)
        .await?;

    Ok(TablePage { table, total, rows })
}

/// Tables removed by the clear operation, child rows before parent rows so
/// foreign keys hold at every step.
const CLEAR_SEQUENCE: [TableName; 10] = [
    TableName::ShopifyOrderCache,
    TableName::OrderLine,
    TableName::Orders,
    TableName::ProductionBatch,
    TableName::BomLine,
    TableName::Sku,
    TableName::Variation,
    TableName::Product,
    TableName::FabricColour,
    TableName::Customer,
];

/// Deleted row counts per table, in deletion order
pub type ClearReport = Vec<(TableName, u64)>;

/// Delete all order/catalog/customer data in one transaction.
///
/// Admin accounts, overrides, and settings are untouched.
pub async fn clear_tables(pool: &SqlitePool) -> RepoResult<ClearReport> {
    let mut tx = pool.begin().await?;
    let mut report = Vec::with_capacity(CLEAR_SEQUENCE.len());

    for table in CLEAR_SEQUENCE {
        let result = sqlx::query(&format!("DELETE FROM {}", table.as_str()))
            .execute(&mut *tx)
            .await?;
        report.push((table, result.rows_affected()));
    }

    tx.commit().await?;
    tracing::warn!(?report, "Cleared all order data");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::order::fixtures::*;
    use crate::db::repository::testing::test_pool;

    #[test]
    fn unknown_table_is_rejected() {
        assert!("orders".parse::<TableName>().is_ok());
        assert!("sqlite_master".parse::<TableName>().is_err());
        assert!("orders; DROP TABLE orders".parse::<TableName>().is_err());
    }

    #[tokio::test]
    async fn table_page_dispatches_and_counts() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;
        insert_order(&pool, &OrderSeed::new(1)).await;
        insert_order(&pool, &OrderSeed::new(2)).await;

        let page = table_page(&pool, TableName::Orders, 1, 0).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.rows.as_array().unwrap().len(), 1);

        let page = table_page(&pool, TableName::Sku, 100, 0).await.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn admin_user_page_hides_password_hash() {
        let pool = test_pool().await;
        sqlx::query(
            "INSERT INTO admin_user (id, email, display_name, hash_pass, role, created_at) \
             VALUES (1, 'ops@shop.in', 'Ops', 'secret-hash', 'admin', 0)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let page = table_page(&pool, TableName::AdminUser, 10, 0).await.unwrap();
        let rows = page.rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("hash_pass").is_none());
        assert_eq!(rows[0].get("email").unwrap(), "ops@shop.in");
    }

    #[tokio::test]
    async fn clear_tables_removes_order_data_and_keeps_accounts() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;
        insert_order(&pool, &OrderSeed::new(1)).await;
        insert_line(&pool, 1, 1, "pending", None, None).await;
        sqlx::query(
            "INSERT INTO admin_user (id, email, display_name, hash_pass, role, created_at) \
             VALUES (1, 'ops@shop.in', 'Ops', 'h', 'admin', 0)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let report = clear_tables(&pool).await.unwrap();
        let deleted: u64 = report.iter().map(|(_, n)| n).sum();
        assert!(deleted >= 5); // order, line, product, variation, sku

        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orders, 0);
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_user")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(users, 1);
    }
}
