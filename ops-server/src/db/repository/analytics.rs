//! Analytics Repository
//!
//! Aggregate queries behind the dashboard snapshot. Revenue counts every
//! non-cancelled order (archived included — archiving is a listing concern,
//! not a revenue one); the open-pipeline queries use the same open-view
//! predicate as the listing filter.

use sqlx::SqlitePool;

use super::RepoResult;
use crate::analytics::{PaymentSplit, PipelineCounts, TopProduct, VariantSales};

/// Membership predicate shared by the pipeline queries (open orders)
const OPEN_ORDERS: &str = "o.is_archived = 0 AND \
    (o.status = 'open' OR (o.released_to_shipped = 0 AND o.released_to_cancelled = 0))";

/// Open-order line counts by status plus total units
pub async fn pipeline_counts(pool: &SqlitePool) -> RepoResult<PipelineCounts> {
    let sql = format!(
        "SELECT \
            COALESCE(SUM(CASE WHEN l.line_status = 'pending' THEN 1 ELSE 0 END), 0) AS pending, \
            COALESCE(SUM(CASE WHEN l.line_status = 'allocated' THEN 1 ELSE 0 END), 0) AS allocated, \
            COALESCE(SUM(CASE WHEN l.line_status = 'packed' THEN 1 ELSE 0 END), 0) AS ready_to_ship, \
            COALESCE(SUM(l.quantity), 0) AS total_units \
         FROM order_line l JOIN orders o ON o.id = l.order_id \
         WHERE {OPEN_ORDERS}"
    );
    let counts = sqlx::query_as::<_, PipelineCounts>(&sql)
        .fetch_one(pool)
        .await?;
    Ok(counts)
}

/// COD vs prepaid split (count and amount) over open orders
pub async fn payment_split(pool: &SqlitePool) -> RepoResult<PaymentSplit> {
    let sql = format!(
        "SELECT \
            COALESCE(SUM(CASE WHEN o.payment_method = 'cod' THEN 1 ELSE 0 END), 0) AS cod_orders, \
            COALESCE(SUM(CASE WHEN o.payment_method = 'cod' THEN o.total_amount ELSE 0.0 END), 0.0) AS cod_amount, \
            COALESCE(SUM(CASE WHEN o.payment_method = 'cod' THEN 0 ELSE 1 END), 0) AS prepaid_orders, \
            COALESCE(SUM(CASE WHEN o.payment_method = 'cod' THEN 0.0 ELSE o.total_amount END), 0.0) AS prepaid_amount \
         FROM orders o WHERE {OPEN_ORDERS}"
    );
    let split = sqlx::query_as::<_, PaymentSplit>(&sql).fetch_one(pool).await?;
    Ok(split)
}

/// Revenue totals for one `[start, end)` period
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RevenueTotals {
    pub revenue: f64,
    pub orders: i64,
    pub new_customers: i64,
    pub returning_customers: i64,
}

/// An order is "new business" when its customer's running order count at
/// that order is exactly 1; orders with no linked customer count as new.
/// Ties on order_date break on id so the expression stays deterministic.
const NEW_CUSTOMER_EXPR: &str = "(o.customer_id IS NULL OR \
    (SELECT COUNT(*) FROM orders o2 WHERE o2.customer_id = o.customer_id \
     AND (o2.order_date < o.order_date \
          OR (o2.order_date = o.order_date AND o2.id <= o.id))) = 1)";

/// Revenue, order count, and new/returning split for one period
pub async fn revenue_period(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<RevenueTotals> {
    let sql = format!(
        "SELECT \
            COALESCE(SUM(o.total_amount), 0.0) AS revenue, \
            COUNT(*) AS orders, \
            COALESCE(SUM(CASE WHEN {NEW_CUSTOMER_EXPR} THEN 1 ELSE 0 END), 0) AS new_customers, \
            COALESCE(SUM(CASE WHEN {NEW_CUSTOMER_EXPR} THEN 0 ELSE 1 END), 0) AS returning_customers \
         FROM orders o \
         WHERE o.released_to_cancelled = 0 AND o.order_date >= ?1 AND o.order_date < ?2"
    );
    let totals = sqlx::query_as::<_, RevenueTotals>(&sql)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;
    Ok(totals)
}

#[derive(Debug, sqlx::FromRow)]
struct ProductVariantRow {
    product_id: i64,
    product_name: String,
    variation_colour: Option<String>,
    units: i64,
}

/// Top products by unit quantity over `[start, end)`, with per-variation
/// breakdown. Cancelled orders and cancelled lines are excluded.
pub async fn top_products(
    pool: &SqlitePool,
    start: i64,
    end: i64,
    limit: usize,
) -> RepoResult<Vec<TopProduct>> {
    let rows = sqlx::query_as::<_, ProductVariantRow>(
        "SELECT p.id AS product_id, p.name AS product_name, \
                v.colour AS variation_colour, \
                COALESCE(SUM(l.quantity), 0) AS units \
         FROM order_line l \
         JOIN orders o ON o.id = l.order_id \
         JOIN sku s ON s.id = l.sku_id \
         JOIN variation v ON v.id = s.variation_id \
         JOIN product p ON p.id = v.product_id \
         WHERE o.released_to_cancelled = 0 \
           AND l.line_status != 'cancelled' \
           AND o.order_date >= ?1 AND o.order_date < ?2 \
         GROUP BY p.id, p.name, v.id, v.colour \
         ORDER BY units DESC",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    // Reshape variant rows into a per-product ranking
    let mut products: Vec<TopProduct> = Vec::new();
    for row in rows {
        match products.iter_mut().find(|p| p.product_id == row.product_id) {
            Some(p) => {
                p.units += row.units;
                p.variants.push(VariantSales {
                    colour: row.variation_colour,
                    units: row.units,
                });
            }
            None => products.push(TopProduct {
                product_id: row.product_id,
                name: row.product_name,
                units: row.units,
                variants: vec![VariantSales {
                    colour: row.variation_colour,
                    units: row.units,
                }],
            }),
        }
    }
    products.sort_by(|a, b| b.units.cmp(&a.units));
    products.truncate(limit);
    for p in &mut products {
        p.variants.sort_by(|a, b| b.units.cmp(&a.units));
    }
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::order::fixtures::*;
    use crate::db::repository::testing::test_pool;

    const DAY_MS: i64 = 86_400_000;
    const T0: i64 = 1_760_000_000_000;

    async fn seed_customer(pool: &SqlitePool, id: i64, name: &str) {
        sqlx::query("INSERT INTO customer (id, name, created_at) VALUES (?1, ?2, 0)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }

    async fn order_at(
        pool: &SqlitePool,
        id: i64,
        date: i64,
        amount: f64,
        customer_id: Option<i64>,
    ) {
        sqlx::query(
            "INSERT INTO orders (id, order_number, status, order_date, customer_id, total_amount, created_at) \
             VALUES (?1, ?2, 'closed', ?3, ?4, ?5, ?3)",
        )
        .bind(id)
        .bind(format!("#{}", 2000 + id))
        .bind(date)
        .bind(customer_id)
        .bind(amount)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn pipeline_counts_open_orders_only() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;

        insert_order(&pool, &OrderSeed::new(1)).await; // open
        insert_line(&pool, 1, 1, "pending", None, None).await;
        insert_line(&pool, 2, 1, "allocated", None, None).await;
        insert_line(&pool, 3, 1, "packed", None, None).await;

        insert_order(&pool, &OrderSeed::new(2).shipped()).await; // not open
        insert_line(&pool, 4, 2, "shipped", None, None).await;

        let counts = pipeline_counts(&pool).await.unwrap();
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.allocated, 1);
        assert_eq!(counts.ready_to_ship, 1);
        assert_eq!(counts.total_units, 3);
    }

    #[tokio::test]
    async fn payment_split_counts_and_amounts() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;
        insert_order(&pool, &OrderSeed::new(1).cod()).await;
        insert_order(&pool, &OrderSeed::new(2)).await;
        insert_order(&pool, &OrderSeed::new(3)).await;

        let split = payment_split(&pool).await.unwrap();
        assert_eq!(split.cod_orders, 1);
        assert_eq!(split.cod_amount, 2499.0);
        assert_eq!(split.prepaid_orders, 2);
        assert_eq!(split.prepaid_amount, 4998.0);
    }

    #[tokio::test]
    async fn revenue_period_splits_new_and_returning() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;
        seed_customer(&pool, 1, "Asha").await;
        seed_customer(&pool, 2, "Meera").await;

        // Asha's first order is before the window; her second is inside
        order_at(&pool, 1, T0 - 10 * DAY_MS, 1000.0, Some(1)).await;
        order_at(&pool, 2, T0 + 1000, 1500.0, Some(1)).await; // returning
        // Meera's first ever order is inside the window
        order_at(&pool, 3, T0 + 2000, 2000.0, Some(2)).await; // new
        // Guest order with no customer link counts as new
        order_at(&pool, 4, T0 + 3000, 500.0, None).await; // new

        let totals = revenue_period(&pool, T0, T0 + DAY_MS).await.unwrap();
        assert_eq!(totals.orders, 3);
        assert_eq!(totals.revenue, 4000.0);
        assert_eq!(totals.new_customers, 2);
        assert_eq!(totals.returning_customers, 1);
    }

    #[tokio::test]
    async fn revenue_period_empty_window_is_zero_not_error() {
        let pool = test_pool().await;
        let totals = revenue_period(&pool, 0, 1000).await.unwrap();
        assert_eq!(totals.orders, 0);
        assert_eq!(totals.revenue, 0.0);
        assert_eq!(totals.new_customers, 0);
    }

    #[tokio::test]
    async fn top_products_rank_and_variant_breakdown() {
        let pool = test_pool().await;
        seed_catalog(&pool).await; // product 1 / variation 1 / sku 10

        // Second variation + sku of product 1, and a second product
        sqlx::query("INSERT INTO variation (id, product_id, colour) VALUES (2, 1, 'Indigo')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO sku (id, variation_id, code, mrp) VALUES (11, 2, 'KRT-IND-M', 2499)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO product (id, name) VALUES (2, 'Mul Saree')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO variation (id, product_id, colour) VALUES (3, 2, 'Rose')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO sku (id, variation_id, code, mrp) VALUES (12, 3, 'SAR-ROS', 4999)",
        )
        .execute(&pool)
        .await
        .unwrap();

        order_at(&pool, 1, T0 + 1, 0.0, None).await;
        // Kurta: 3 red + 2 indigo = 5 units; Saree: 4 units
        sqlx::query(
            "INSERT INTO order_line (id, order_id, sku_id, quantity, unit_price, line_status) VALUES \
             (1, 1, 10, 3, 1999, 'pending'), \
             (2, 1, 11, 2, 1999, 'pending'), \
             (3, 1, 12, 4, 3999, 'pending'), \
             (4, 1, 12, 9, 3999, 'cancelled')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let top = top_products(&pool, T0, T0 + DAY_MS, 6).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Block Print Kurta");
        assert_eq!(top[0].units, 5);
        assert_eq!(top[0].variants.len(), 2);
        assert_eq!(top[0].variants[0].colour.as_deref(), Some("Red"));
        assert_eq!(top[0].variants[0].units, 3);
        // cancelled line is excluded from the saree total
        assert_eq!(top[1].units, 4);

        let top1 = top_products(&pool, T0, T0 + DAY_MS, 1).await.unwrap();
        assert_eq!(top1.len(), 1);
    }
}
