//! Cross-category search aggregator
//!
//! Runs the OR-search predicate independently against each named bucket,
//! concurrently, and returns only the non-empty buckets with a running
//! total. Read-only; zero matches in every bucket is an empty result, not
//! an error.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, order};
use crate::listing::filter::SearchBucket;
use shared::models::Order;

/// One non-empty bucket of search hits
#[derive(Debug, Serialize)]
pub struct SearchBucketResult {
    pub bucket: SearchBucket,
    pub display_name: &'static str,
    pub count: usize,
    pub orders: Vec<Order>,
}

/// Aggregated search response
#[derive(Debug, Serialize)]
pub struct SearchAllResults {
    pub results: Vec<SearchBucketResult>,
    pub total_results: usize,
}

/// Search every bucket concurrently; each bucket is capped at `cap` (≤ 20).
pub async fn search_all(
    pool: &SqlitePool,
    term: &str,
    cap: u32,
) -> RepoResult<SearchAllResults> {
    let [open, shipped, rto, cod_pending, cancelled, archived] = SearchBucket::ALL;

    let (open, shipped, rto, cod_pending, cancelled, archived) = tokio::try_join!(
        order::search_bucket(pool, open, term, cap),
        order::search_bucket(pool, shipped, term, cap),
        order::search_bucket(pool, rto, term, cap),
        order::search_bucket(pool, cod_pending, term, cap),
        order::search_bucket(pool, cancelled, term, cap),
        order::search_bucket(pool, archived, term, cap),
    )?;

    let buckets = [
        (SearchBucket::Open, open),
        (SearchBucket::Shipped, shipped),
        (SearchBucket::Rto, rto),
        (SearchBucket::CodPending, cod_pending),
        (SearchBucket::Cancelled, cancelled),
        (SearchBucket::Archived, archived),
    ];

    let mut results = Vec::new();
    let mut total_results = 0;
    for (bucket, orders) in buckets {
        if orders.is_empty() {
            continue;
        }
        total_results += orders.len();
        results.push(SearchBucketResult {
            bucket,
            display_name: bucket.display_name(),
            count: orders.len(),
            orders,
        });
    }

    Ok(SearchAllResults {
        results,
        total_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::order::fixtures::*;
    use crate::db::repository::testing::test_pool;

    #[tokio::test]
    async fn empty_match_returns_empty_not_error() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;
        insert_order(&pool, &OrderSeed::new(1)).await;

        let res = search_all(&pool, "zz-no-such-order", 20).await.unwrap();
        assert!(res.results.is_empty());
        assert_eq!(res.total_results, 0);
    }

    #[tokio::test]
    async fn buckets_are_disjointly_reported_and_totalled() {
        let pool = test_pool().await;
        seed_catalog(&pool).await;

        // One open, one shipped (in transit), one cancelled — same customer
        let mut open = OrderSeed::new(1);
        open.customer_name = Some("Kavya Nair".into());
        insert_order(&pool, &open).await;

        let mut shipped = OrderSeed::new(2).shipped();
        shipped.customer_name = Some("Kavya Nair".into());
        insert_order(&pool, &shipped).await;
        insert_line(&pool, 1, 2, "shipped", Some("in_transit"), None).await;

        let mut cancelled = OrderSeed::new(3).cancelled();
        cancelled.customer_name = Some("Kavya Nair".into());
        insert_order(&pool, &cancelled).await;

        let res = search_all(&pool, "Kavya", 20).await.unwrap();
        assert_eq!(res.total_results, 3);
        let names: Vec<&str> = res.results.iter().map(|r| r.display_name).collect();
        assert_eq!(names, vec!["Open Orders", "Shipped", "Cancelled"]);
        assert!(res.results.iter().all(|r| r.count == r.orders.len()));
    }
}
