//! Order Repository
//!
//! Read access to orders, lines (with catalog context), customers, and the
//! Shopify snapshot cache. All mutations happen upstream; the listing
//! pipeline only reads.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::listing::filter::{
    MAX_BUCKET_RESULTS, OrderListQuery, SearchBucket, UnifiedView, push_bucket_clause,
    push_list_filter, push_search_clause, push_unified_clause,
};
use shared::models::{Customer, Order, OrderLineDetail, ShopifyOrderCache};

/// Line + catalog context projection used by the grid flattener.
///
/// The BOM join picks the first (lowest-id) fabric link; `bom_cost` sums all
/// BOM lines. A SKU with no BOM keeps NULL in both fabric columns.
const LINE_DETAIL_SELECT: &str = "SELECT l.id, l.order_id, l.sku_id, l.quantity, l.unit_price, l.line_status, \
 l.awb_number, l.courier, l.shipped_at, l.delivered_at, l.tracking_status, \
 l.last_scan_at, l.last_scan_location, l.rto_initiated_at, l.rto_received_at, \
 l.return_status, l.return_quantity, l.is_custom, \
 s.code AS sku_code, s.size AS sku_size, s.mrp, \
 v.colour AS variation_colour, v.image_url AS variation_image_url, \
 p.name AS product_name, \
 (SELECT SUM(b.cost_per_unit) FROM bom_line b WHERE b.sku_id = s.id) AS bom_cost, \
 fc.name AS fabric_colour_name, fc.is_out_of_stock AS fabric_out_of_stock, \
 pb.code AS batch_code, pb.status AS batch_status \
 FROM order_line l \
 JOIN sku s ON l.sku_id = s.id \
 JOIN variation v ON s.variation_id = v.id \
 JOIN product p ON v.product_id = p.id \
 LEFT JOIN bom_line fbl ON fbl.id = (SELECT MIN(b2.id) FROM bom_line b2 WHERE b2.sku_id = s.id) \
 LEFT JOIN fabric_colour fc ON fc.id = fbl.fabric_colour_id \
 LEFT JOIN production_batch pb ON pb.id = l.production_batch_id";

/// Full order detail for the detail view
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    pub order: Order,
    pub lines: Vec<OrderLineDetail>,
    pub customer: Option<Customer>,
    pub shopify: Option<ShopifyOrderCache>,
}

/// List orders for a primary view: filtered page plus total count, fetched
/// concurrently.
pub async fn list(
    pool: &SqlitePool,
    q: &OrderListQuery,
    now_millis: i64,
) -> RepoResult<(Vec<Order>, u64)> {
    let mut rows_qb = QueryBuilder::<Sqlite>::new("SELECT o.* FROM orders o");
    push_list_filter(&mut rows_qb, q, now_millis);
    rows_qb.push(format!(
        " ORDER BY o.{} DESC, o.id DESC LIMIT ",
        q.sort.column()
    ));
    rows_qb.push_bind(q.page_size as i64);
    rows_qb.push(" OFFSET ");
    rows_qb.push_bind(q.offset());

    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM orders o");
    push_list_filter(&mut count_qb, q, now_millis);

    let rows_fut = rows_qb.build_query_as::<Order>().fetch_all(pool);
    let count_fut = count_qb.build_query_scalar::<i64>().fetch_one(pool);

    let (rows, count) = tokio::try_join!(rows_fut, count_fut).map_err(RepoError::from)?;
    Ok((rows, count.max(0) as u64))
}

/// Find an order row by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

/// Find an order row by its human order number
pub async fn find_by_number(pool: &SqlitePool, order_number: &str) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE order_number = ? LIMIT 1")
        .bind(order_number)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

/// Load the full detail graph for one order
pub async fn load_detail(pool: &SqlitePool, order: Order) -> RepoResult<OrderDetail> {
    let order_ids = [order.id];
    let lines_fut = lines_for_orders(pool, &order_ids);

    let customer_fut = async {
        match order.customer_id {
            Some(cid) => {
                sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE id = ?")
                    .bind(cid)
                    .fetch_optional(pool)
                    .await
                    .map_err(RepoError::from)
            }
            None => Ok(None),
        }
    };

    let shopify_fut = async {
        sqlx::query_as::<_, ShopifyOrderCache>(
            "SELECT * FROM shopify_order_cache WHERE order_id = ?",
        )
        .bind(order.id)
        .fetch_optional(pool)
        .await
        .map_err(RepoError::from)
    };

    let (lines, customer, shopify) = tokio::try_join!(lines_fut, customer_fut, shopify_fut)?;

    Ok(OrderDetail {
        order,
        lines,
        customer,
        shopify,
    })
}

/// Fetch line details (with catalog context) for a set of orders
pub async fn lines_for_orders(
    pool: &SqlitePool,
    order_ids: &[i64],
) -> RepoResult<Vec<OrderLineDetail>> {
    if order_ids.is_empty() {
        return Ok(vec![]);
    }

    let mut qb = QueryBuilder::<Sqlite>::new(LINE_DETAIL_SELECT);
    qb.push(" WHERE l.order_id IN (");
    let mut sep = qb.separated(", ");
    for id in order_ids {
        sep.push_bind(*id);
    }
    qb.push(") ORDER BY l.order_id, l.id");

    let lines = qb
        .build_query_as::<OrderLineDetail>()
        .fetch_all(pool)
        .await?;
    Ok(lines)
}

/// Fetch customers by id (for tag display on the grid)
pub async fn customers_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Customer>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM customer WHERE id IN (");
    let mut sep = qb.separated(", ");
    for id in ids {
        sep.push_bind(*id);
    }
    qb.push(")");

    let customers = qb.build_query_as::<Customer>().fetch_all(pool).await?;
    Ok(customers)
}

/// Run the OR-search inside one aggregator bucket, capped.
pub async fn search_bucket(
    pool: &SqlitePool,
    bucket: SearchBucket,
    term: &str,
    cap: u32,
) -> RepoResult<Vec<Order>> {
    let cap = cap.clamp(1, MAX_BUCKET_RESULTS);

    let mut qb = QueryBuilder::<Sqlite>::new("SELECT o.* FROM orders o WHERE ");
    if bucket != SearchBucket::Archived {
        qb.push("o.is_archived = 0 AND ");
    }
    push_bucket_clause(&mut qb, bucket);
    qb.push(" AND ");
    push_search_clause(&mut qb, term);
    qb.push(" ORDER BY o.order_date DESC, o.id DESC LIMIT ");
    qb.push_bind(cap as i64);

    let orders = qb.build_query_as::<Order>().fetch_all(pool).await?;
    Ok(orders)
}

/// Unified search: one paginated list across a tab filter, count and page
/// fetched concurrently.
pub async fn unified_list(
    pool: &SqlitePool,
    view: UnifiedView,
    search: Option<&str>,
    page: u32,
    page_size: u32,
) -> RepoResult<(Vec<Order>, u64)> {
    let page = page.max(1);
    let page_size = page_size.clamp(1, crate::listing::filter::MAX_PAGE_SIZE);
    let offset = ((page - 1) as i64) * (page_size as i64);

    fn push_where(qb: &mut QueryBuilder<'_, Sqlite>, view: UnifiedView, search: Option<&str>) {
        qb.push(" WHERE ");
        if view != UnifiedView::Archived {
            qb.push("o.is_archived = 0 AND ");
        }
        push_unified_clause(qb, view);
        if let Some(term) = search {
            qb.push(" AND ");
            push_search_clause(qb, term);
        }
    }

    let mut rows_qb = QueryBuilder::<Sqlite>::new("SELECT o.* FROM orders o");
    push_where(&mut rows_qb, view, search);
    rows_qb.push(" ORDER BY o.order_date DESC, o.id DESC LIMIT ");
    rows_qb.push_bind(page_size as i64);
    rows_qb.push(" OFFSET ");
    rows_qb.push_bind(offset);

    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM orders o");
    push_where(&mut count_qb, view, search);

    let rows_fut = rows_qb.build_query_as::<Order>().fetch_all(pool);
    let count_fut = count_qb.build_query_scalar::<i64>().fetch_one(pool);

    let (rows, count) = tokio::try_join!(rows_fut, count_fut).map_err(RepoError::from)?;
    Ok((rows, count.max(0) as u64))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use sqlx::SqlitePool;

    /// Minimal catalog: one product → variation → SKU (id 10), no BOM.
    pub async fn seed_catalog(pool: &SqlitePool) {
        sqlx::query("INSERT INTO product (id, name) VALUES (1, 'Block Print Kurta')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO variation (id, product_id, colour) VALUES (1, 1, 'Red')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO sku (id, variation_id, code, size, mrp) VALUES (10, 1, 'KRT-RED-M', 'M', 2499)",
        )
        .execute(pool)
        .await
        .unwrap();
    }

    pub struct OrderSeed {
        pub id: i64,
        pub number: String,
        pub status: String,
        pub released_to_shipped: bool,
        pub released_to_cancelled: bool,
        pub is_archived: bool,
        pub payment_method: Option<String>,
        pub cod_remitted_at: Option<i64>,
        pub order_date: i64,
        pub customer_name: Option<String>,
    }

    impl OrderSeed {
        pub fn new(id: i64) -> Self {
            Self {
                id,
                number: format!("#{}", 1000 + id),
                status: "open".into(),
                released_to_shipped: false,
                released_to_cancelled: false,
                is_archived: false,
                payment_method: Some("prepaid".into()),
                cod_remitted_at: None,
                order_date: 1_700_000_000_000,
                customer_name: Some("Asha Rao".into()),
            }
        }

        pub fn shipped(mut self) -> Self {
            self.status = "closed".into();
            self.released_to_shipped = true;
            self
        }

        pub fn cancelled(mut self) -> Self {
            self.status = "closed".into();
            self.released_to_cancelled = true;
            self
        }

        pub fn archived(mut self) -> Self {
            self.is_archived = true;
            self
        }

        pub fn cod(mut self) -> Self {
            self.payment_method = Some("cod".into());
            self
        }
    }

    pub async fn insert_order(pool: &SqlitePool, seed: &OrderSeed) {
        sqlx::query(
            "INSERT INTO orders (id, order_number, status, order_date, customer_name, \
             total_amount, payment_method, is_archived, released_to_shipped, \
             released_to_cancelled, cod_remitted_at, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, 2499, ?6, ?7, ?8, ?9, ?10, ?4)",
        )
        .bind(seed.id)
        .bind(&seed.number)
        .bind(&seed.status)
        .bind(seed.order_date)
        .bind(&seed.customer_name)
        .bind(&seed.payment_method)
        .bind(seed.is_archived)
        .bind(seed.released_to_shipped)
        .bind(seed.released_to_cancelled)
        .bind(seed.cod_remitted_at)
        .execute(pool)
        .await
        .unwrap();
    }

    pub async fn insert_line(
        pool: &SqlitePool,
        id: i64,
        order_id: i64,
        line_status: &str,
        tracking_status: Option<&str>,
        awb: Option<&str>,
    ) {
        sqlx::query(
            "INSERT INTO order_line (id, order_id, sku_id, quantity, unit_price, line_status, \
             tracking_status, awb_number) VALUES (?1, ?2, 10, 1, 1999, ?3, ?4, ?5)",
        )
        .bind(id)
        .bind(order_id)
        .bind(line_status)
        .bind(tracking_status)
        .bind(awb)
        .execute(pool)
        .await
        .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::db::repository::testing::test_pool;
    use crate::listing::filter::{OrderListView, ShippedSubFilter, SortField};

    const NOW: i64 = 1_700_864_000_000;

    fn query(view: OrderListView) -> OrderListQuery {
        OrderListQuery {
            view,
            sub_filter: None,
            search: None,
            days: None,
            sort: SortField::OrderDate,
            page: 1,
            page_size: 100,
        }
    }

    async fn ids(pool: &SqlitePool, q: &OrderListQuery) -> Vec<i64> {
        let (orders, _) = list(pool, q, NOW).await.unwrap();
        let mut ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn open_view_membership_matrix() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;

        // (id, status, released_to_shipped, released_to_cancelled)
        let combos = [
            (1, "open", false, false),
            (2, "open", true, false),
            (3, "open", false, true),
            (4, "open", true, true),
            (5, "closed", false, false),
            (6, "closed", true, false),
            (7, "closed", false, true),
            (8, "closed", true, true),
        ];
        for (id, status, rts, rtc) in combos {
            let mut seed = OrderSeed::new(id);
            seed.status = status.into();
            seed.released_to_shipped = rts;
            seed.released_to_cancelled = rtc;
            insert_order(&pool, &seed).await;
        }

        // open ⇔ status == 'open' OR (!rts AND !rtc)
        let got = ids(&pool, &query(OrderListView::Open)).await;
        assert_eq!(got, vec![1, 2, 3, 4, 5]);

        let got = ids(&pool, &query(OrderListView::Shipped)).await;
        assert_eq!(got, vec![2, 4, 6, 8]);

        let got = ids(&pool, &query(OrderListView::Cancelled)).await;
        assert_eq!(got, vec![3, 4, 7, 8]);
    }

    #[tokio::test]
    async fn archived_orders_are_excluded_from_every_view() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;
        insert_order(&pool, &OrderSeed::new(1)).await;
        insert_order(&pool, &OrderSeed::new(2).archived()).await;
        insert_order(&pool, &OrderSeed::new(3).shipped().archived()).await;

        assert_eq!(ids(&pool, &query(OrderListView::Open)).await, vec![1]);
        assert!(ids(&pool, &query(OrderListView::Shipped)).await.is_empty());

        // ...except the archived tab itself
        let (rows, total) = unified_list(&pool, UnifiedView::Archived, None, 1, 50)
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn shipped_sub_filters() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;

        // RTO order
        insert_order(&pool, &OrderSeed::new(1).shipped()).await;
        insert_line(&pool, 1, 1, "shipped", Some("rto_in_transit"), Some("AWB1")).await;
        // Plain shipped, in transit
        insert_order(&pool, &OrderSeed::new(2).shipped()).await;
        insert_line(&pool, 2, 2, "shipped", Some("in_transit"), Some("AWB2")).await;
        // COD delivered, unremitted
        insert_order(&pool, &OrderSeed::new(3).shipped().cod()).await;
        insert_line(&pool, 3, 3, "shipped", Some("delivered"), Some("AWB3")).await;
        // COD delivered, remitted
        let mut remitted = OrderSeed::new(4).shipped().cod();
        remitted.cod_remitted_at = Some(NOW - 1000);
        insert_order(&pool, &remitted).await;
        insert_line(&pool, 4, 4, "shipped", Some("delivered"), Some("AWB4")).await;

        let mut q = query(OrderListView::Shipped);
        assert_eq!(ids(&pool, &q).await, vec![1, 2, 3, 4]);

        q.sub_filter = Some(ShippedSubFilter::Rto);
        assert_eq!(ids(&pool, &q).await, vec![1]);

        q.sub_filter = Some(ShippedSubFilter::CodPending);
        assert_eq!(ids(&pool, &q).await, vec![3]);
    }

    #[tokio::test]
    async fn search_matches_number_name_and_awb() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;

        let mut a = OrderSeed::new(1);
        a.customer_name = Some("Meera Iyer".into());
        insert_order(&pool, &a).await;
        insert_line(&pool, 1, 1, "pending", None, Some("DLV900123")).await;

        let mut b = OrderSeed::new(2);
        b.customer_name = Some("Rohan Shah".into());
        insert_order(&pool, &b).await;

        let mut q = query(OrderListView::Open);

        q.search = Some("meera".into());
        assert_eq!(ids(&pool, &q).await, vec![1]);

        q.search = Some("#1002".into());
        assert_eq!(ids(&pool, &q).await, vec![2]);

        q.search = Some("900123".into());
        assert_eq!(ids(&pool, &q).await, vec![1]);

        q.search = Some("nomatch".into());
        assert!(ids(&pool, &q).await.is_empty());
    }

    #[tokio::test]
    async fn days_filter_uses_order_date_cutoff() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;

        let mut recent = OrderSeed::new(1);
        recent.order_date = NOW - 86_400_000; // 1 day ago
        insert_order(&pool, &recent).await;

        let mut old = OrderSeed::new(2);
        old.order_date = NOW - 40 * 86_400_000; // 40 days ago
        insert_order(&pool, &old).await;

        let mut q = query(OrderListView::Open);
        q.days = Some(30);
        assert_eq!(ids(&pool, &q).await, vec![1]);

        q.days = Some(90);
        assert_eq!(ids(&pool, &q).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn list_paginates_and_counts() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;
        for id in 1..=7 {
            let mut seed = OrderSeed::new(id);
            seed.order_date = 1_700_000_000_000 + id;
            insert_order(&pool, &seed).await;
        }

        let mut q = query(OrderListView::Open);
        q.page_size = 3;
        q.page = 1;
        let (rows, total) = list(&pool, &q, NOW).await.unwrap();
        assert_eq!(total, 7);
        assert_eq!(rows.len(), 3);
        // order_date DESC: newest first
        assert_eq!(rows[0].id, 7);

        q.page = 3;
        let (rows, _) = list(&pool, &q, NOW).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
    }

    #[tokio::test]
    async fn bucket_results_are_capped() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;
        for id in 1..=25 {
            let mut seed = OrderSeed::new(id);
            seed.customer_name = Some("Asha Common".into());
            insert_order(&pool, &seed).await;
        }

        let hits = search_bucket(&pool, SearchBucket::Open, "Common", 20)
            .await
            .unwrap();
        assert_eq!(hits.len(), 20);

        // a larger requested cap is still clamped
        let hits = search_bucket(&pool, SearchBucket::Open, "Common", 500)
            .await
            .unwrap();
        assert_eq!(hits.len(), 20);
    }

    #[tokio::test]
    async fn cod_delivered_order_lands_in_cod_pending_not_rto() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;

        // Order #1001: COD, one shipped line with delivered tracking
        insert_order(&pool, &OrderSeed::new(1).shipped().cod()).await;
        insert_line(&pool, 1, 1, "shipped", Some("delivered"), Some("AWB1")).await;

        let rto = search_bucket(&pool, SearchBucket::Rto, "#1001", 20)
            .await
            .unwrap();
        assert!(rto.is_empty(), "delivered tracking is not in the RTO set");

        let cod = search_bucket(&pool, SearchBucket::CodPending, "#1001", 20)
            .await
            .unwrap();
        assert_eq!(cod.len(), 1);

        let shipped = search_bucket(&pool, SearchBucket::Shipped, "#1001", 20)
            .await
            .unwrap();
        assert_eq!(shipped.len(), 1);

        // After remittance it leaves cod_pending but stays in shipped
        sqlx::query("UPDATE orders SET cod_remitted_at = ?1 WHERE id = 1")
            .bind(NOW)
            .execute(&pool)
            .await
            .unwrap();

        let cod = search_bucket(&pool, SearchBucket::CodPending, "#1001", 20)
            .await
            .unwrap();
        assert!(cod.is_empty());
        let shipped = search_bucket(&pool, SearchBucket::Shipped, "#1001", 20)
            .await
            .unwrap();
        assert_eq!(shipped.len(), 1);
    }

    #[tokio::test]
    async fn unified_tabs_follow_line_tracking() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;

        // In transit: shipped line, no terminal tracking
        insert_order(&pool, &OrderSeed::new(1).shipped()).await;
        insert_line(&pool, 1, 1, "shipped", Some("in_transit"), None).await;
        // Shipped with no scan yet still counts as in transit
        insert_order(&pool, &OrderSeed::new(2).shipped()).await;
        insert_line(&pool, 2, 2, "shipped", None, None).await;
        // Delivered
        insert_order(&pool, &OrderSeed::new(3).shipped()).await;
        insert_line(&pool, 3, 3, "shipped", Some("delivered"), None).await;
        // RTO
        insert_order(&pool, &OrderSeed::new(4).shipped()).await;
        insert_line(&pool, 4, 4, "shipped", Some("rto_initiated"), None).await;

        let (rows, _) = unified_list(&pool, UnifiedView::InTransit, None, 1, 50)
            .await
            .unwrap();
        let mut got: Vec<i64> = rows.iter().map(|o| o.id).collect();
        got.sort();
        assert_eq!(got, vec![1, 2]);

        let (rows, _) = unified_list(&pool, UnifiedView::Delivered, None, 1, 50)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 3);

        let (rows, _) = unified_list(&pool, UnifiedView::Rto, None, 1, 50)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 4);

        let (_, total) = unified_list(&pool, UnifiedView::All, None, 1, 50)
            .await
            .unwrap();
        assert_eq!(total, 4);
    }

    #[tokio::test]
    async fn detail_loads_lines_and_tri_state_fabric() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;

        // Second SKU with a BOM fabric link flagged out of stock
        sqlx::query(
            "INSERT INTO sku (id, variation_id, code, size, mrp) VALUES (11, 1, 'KRT-RED-L', 'L', 2499)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO fabric_colour (id, name, stock_metres, is_out_of_stock) VALUES (5, 'Madder Red', 0, 1)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO bom_line (id, sku_id, fabric_colour_id, metres_per_unit, cost_per_unit) \
             VALUES (1, 11, 5, 2.5, 600)",
        )
        .execute(&pool)
        .await
        .unwrap();

        insert_order(&pool, &OrderSeed::new(1)).await;
        insert_line(&pool, 1, 1, "pending", None, None).await; // sku 10, no BOM
        sqlx::query(
            "INSERT INTO order_line (id, order_id, sku_id, quantity, unit_price, line_status) \
             VALUES (2, 1, 11, 1, 1999, 'pending')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let order = find_by_number(&pool, "#1001").await.unwrap().unwrap();
        let detail = load_detail(&pool, order).await.unwrap();
        assert_eq!(detail.lines.len(), 2);

        let no_bom = &detail.lines[0];
        assert_eq!(no_bom.fabric_out_of_stock, None);
        assert_eq!(no_bom.bom_cost, None);

        let with_bom = &detail.lines[1];
        assert_eq!(with_bom.fabric_out_of_stock, Some(true));
        assert_eq!(with_bom.bom_cost, Some(600.0));
        assert_eq!(with_bom.fabric_colour_name.as_deref(), Some("Madder Red"));
    }

    #[tokio::test]
    async fn find_by_id_and_missing() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;
        insert_order(&pool, &OrderSeed::new(1)).await;

        assert!(find_by_id(&pool, 1).await.unwrap().is_some());
        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
        assert!(find_by_number(&pool, "#9999").await.unwrap().is_none());
    }
}
