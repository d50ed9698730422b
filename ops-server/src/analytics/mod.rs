//! Dashboard analytics snapshot
//!
//! Open-pipeline counts, COD/prepaid split, revenue for six fixed periods
//! with new-vs-returning customer split, and a top-product ranking. All
//! period boundaries are computed in the business timezone and converted to
//! UTC millis before querying. This is a read-only reporting function: any
//! database error propagates to the caller — never partial/zeroed numbers.

use chrono::Duration;
use chrono_tz::Tz;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, analytics as repo};
use crate::utils::time::{civil_date_at, day_end_millis, day_start_millis, month_start, prev_month_start};

/// Open-order pipeline line counts
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PipelineCounts {
    pub pending: i64,
    pub allocated: i64,
    pub ready_to_ship: i64,
    pub total_units: i64,
}

/// COD vs prepaid split over open orders
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PaymentSplit {
    pub cod_orders: i64,
    pub cod_amount: f64,
    pub prepaid_orders: i64,
    pub prepaid_amount: f64,
}

/// Revenue for one fixed period
#[derive(Debug, Clone, Serialize)]
pub struct RevenuePeriod {
    pub key: &'static str,
    pub start: i64,
    pub end: i64,
    pub revenue: f64,
    pub orders: i64,
    /// Orders whose customer's running order count is 1 (no linked customer
    /// counts as new)
    pub new_customers: i64,
    pub returning_customers: i64,
    /// Day-over-day change, only set for `today`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

/// Per-variation sales inside a top product
#[derive(Debug, Clone, Serialize)]
pub struct VariantSales {
    pub colour: Option<String>,
    pub units: i64,
}

/// One entry of the top-product ranking
#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub product_id: i64,
    pub name: String,
    pub units: i64,
    pub variants: Vec<VariantSales>,
}

/// Full dashboard snapshot
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    pub pipeline: PipelineCounts,
    pub payment_split: PaymentSplit,
    pub revenue: Vec<RevenuePeriod>,
    pub top_products: Vec<TopProduct>,
}

/// Half-open period `[start, end)` in UTC millis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodBounds {
    pub key: &'static str,
    pub start: i64,
    pub end: i64,
}

/// The six fixed reporting periods, anchored on the civil date at
/// `now_millis` in the business timezone.
pub fn period_bounds(now_millis: i64, tz: Tz) -> [PeriodBounds; 6] {
    let today = civil_date_at(now_millis, tz);
    let tomorrow_start = day_end_millis(today, tz);
    let today_start = day_start_millis(today, tz);

    [
        PeriodBounds {
            key: "today",
            start: today_start,
            end: tomorrow_start,
        },
        PeriodBounds {
            key: "yesterday",
            start: day_start_millis(today - Duration::days(1), tz),
            end: today_start,
        },
        PeriodBounds {
            key: "last_7_days",
            start: day_start_millis(today - Duration::days(6), tz),
            end: tomorrow_start,
        },
        PeriodBounds {
            key: "last_30_days",
            start: day_start_millis(today - Duration::days(29), tz),
            end: tomorrow_start,
        },
        PeriodBounds {
            key: "last_month",
            start: day_start_millis(prev_month_start(today), tz),
            end: day_start_millis(month_start(today), tz),
        },
        PeriodBounds {
            key: "month_to_date",
            start: day_start_millis(month_start(today), tz),
            end: tomorrow_start,
        },
    ]
}

/// Day-over-day percent change; a zero baseline maps to 100 when today has
/// revenue and 0 otherwise.
pub fn day_over_day_change(today: f64, yesterday: f64) -> f64 {
    if yesterday > 0.0 {
        (today - yesterday) / yesterday * 100.0
    } else if today > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Compute the full dashboard snapshot.
///
/// The pipeline/split/top-product queries and all six revenue periods run
/// concurrently; they are read-only and target disjoint result sets.
pub async fn snapshot(
    pool: &SqlitePool,
    tz: Tz,
    now_millis: i64,
) -> RepoResult<AnalyticsSnapshot> {
    let periods = period_bounds(now_millis, tz);
    let [today, yesterday, last7, last30, last_month, mtd] = periods;

    let top_window = periods[3]; // trailing 30 days

    let (
        pipeline,
        payment_split,
        top_products,
        today_rev,
        yesterday_rev,
        last7_rev,
        last30_rev,
        last_month_rev,
        mtd_rev,
    ) = tokio::try_join!(
        repo::pipeline_counts(pool),
        repo::payment_split(pool),
        repo::top_products(pool, top_window.start, top_window.end, 6),
        repo::revenue_period(pool, today.start, today.end),
        repo::revenue_period(pool, yesterday.start, yesterday.end),
        repo::revenue_period(pool, last7.start, last7.end),
        repo::revenue_period(pool, last30.start, last30.end),
        repo::revenue_period(pool, last_month.start, last_month.end),
        repo::revenue_period(pool, mtd.start, mtd.end),
    )?;

    let change = day_over_day_change(today_rev.revenue, yesterday_rev.revenue);

    let revenue = [
        (today, today_rev, Some(change)),
        (yesterday, yesterday_rev, None),
        (last7, last7_rev, None),
        (last30, last30_rev, None),
        (last_month, last_month_rev, None),
        (mtd, mtd_rev, None),
    ]
    .into_iter()
    .map(|(bounds, totals, change_percent)| RevenuePeriod {
        key: bounds.key,
        start: bounds.start,
        end: bounds.end,
        revenue: totals.revenue,
        orders: totals.orders,
        new_customers: totals.new_customers,
        returning_customers: totals.returning_customers,
        change_percent,
    })
    .collect();

    Ok(AnalyticsSnapshot {
        pipeline,
        payment_split,
        revenue,
        top_products,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::Asia::Kolkata;

    fn noon_ist(date: NaiveDate) -> i64 {
        crate::utils::time::date_hms_to_millis(date, 12, 0, 0, Kolkata)
    }

    #[test]
    fn periods_are_half_open_and_contiguous() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let now = noon_ist(today);
        let periods = period_bounds(now, Kolkata);

        let by_key = |k: &str| *periods.iter().find(|p| p.key == k).unwrap();

        let t = by_key("today");
        let y = by_key("yesterday");
        assert_eq!(y.end, t.start);
        assert_eq!(t.end - t.start, 86_400_000);
        assert_eq!(y.end - y.start, 86_400_000);

        let l7 = by_key("last_7_days");
        assert_eq!(l7.end, t.end);
        assert_eq!(l7.end - l7.start, 7 * 86_400_000);

        let l30 = by_key("last_30_days");
        assert_eq!(l30.end - l30.start, 30 * 86_400_000);

        let lm = by_key("last_month");
        assert_eq!(
            lm.start,
            day_start_millis(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(), Kolkata)
        );
        assert_eq!(
            lm.end,
            day_start_millis(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), Kolkata)
        );

        let mtd = by_key("month_to_date");
        assert_eq!(mtd.start, lm.end);
        assert_eq!(mtd.end, t.end);
    }

    #[test]
    fn period_anchor_uses_business_timezone() {
        // 2026-03-09 20:00 UTC = 2026-03-10 01:30 IST → "today" is the 10th
        let late_utc = NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        let periods = period_bounds(late_utc, Kolkata);
        let today = periods[0];
        assert_eq!(
            today.start,
            day_start_millis(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(), Kolkata)
        );
    }

    #[test]
    fn dod_change_handles_zero_baseline() {
        assert_eq!(day_over_day_change(150.0, 100.0), 50.0);
        assert_eq!(day_over_day_change(50.0, 100.0), -50.0);
        assert_eq!(day_over_day_change(10.0, 0.0), 100.0);
        assert_eq!(day_over_day_change(0.0, 0.0), 0.0);
    }
}
