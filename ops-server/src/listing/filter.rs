//! Order view filters
//!
//! Translates a requested view plus optional free-text search and a
//! "days since" cutoff into a SQL predicate. Pure construction over a
//! `QueryBuilder`; no queries are executed here.
//!
//! Two taxonomies are live: the primary listing views
//! ([`OrderListView`], with an optional shipped sub-filter) and the
//! tab set used by unified search ([`UnifiedView`]). The cross-bucket
//! aggregator uses [`SearchBucket`].

use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite};

use shared::{AppError, AppResult, ErrorCode};

/// Courier tracking statuses that mean a shipment is returning to origin
pub const RTO_TRACKING_STATUSES: [&str; 4] = [
    "rto_initiated",
    "rto_in_transit",
    "rto_delivered",
    "rto_received",
];

/// Tracking statuses that end the in-transit phase (delivered or RTO)
pub const TERMINAL_TRACKING_STATUSES: [&str; 5] = [
    "delivered",
    "rto_initiated",
    "rto_in_transit",
    "rto_delivered",
    "rto_received",
];

/// Hard cap on page size
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Per-bucket cap for the cross-bucket search aggregator
pub const MAX_BUCKET_RESULTS: u32 = 20;

/// Primary listing views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderListView {
    Open,
    Shipped,
    Cancelled,
}

impl OrderListView {
    pub fn from_param(s: &str) -> AppResult<Self> {
        match s {
            "open" => Ok(Self::Open),
            "shipped" => Ok(Self::Shipped),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::with_message(
                ErrorCode::InvalidView,
                format!("Unknown order view: {other}"),
            )),
        }
    }
}

/// Narrowing filters on the shipped view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippedSubFilter {
    Rto,
    CodPending,
}

impl ShippedSubFilter {
    pub fn from_param(s: &str) -> AppResult<Self> {
        match s {
            "rto" => Ok(Self::Rto),
            "cod_pending" => Ok(Self::CodPending),
            other => Err(AppError::with_message(
                ErrorCode::InvalidView,
                format!("Unknown shipped sub-filter: {other}"),
            )),
        }
    }
}

/// Tab set served by unified search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnifiedView {
    All,
    InTransit,
    Delivered,
    Rto,
    Cancelled,
    Archived,
}

impl UnifiedView {
    pub fn from_param(s: &str) -> AppResult<Self> {
        match s {
            "all" => Ok(Self::All),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "rto" => Ok(Self::Rto),
            "cancelled" => Ok(Self::Cancelled),
            "archived" => Ok(Self::Archived),
            other => Err(AppError::with_message(
                ErrorCode::InvalidView,
                format!("Unknown search tab: {other}"),
            )),
        }
    }
}

/// Buckets of the cross-category search aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBucket {
    Open,
    Shipped,
    Rto,
    CodPending,
    Cancelled,
    Archived,
}

impl SearchBucket {
    pub const ALL: [SearchBucket; 6] = [
        SearchBucket::Open,
        SearchBucket::Shipped,
        SearchBucket::Rto,
        SearchBucket::CodPending,
        SearchBucket::Cancelled,
        SearchBucket::Archived,
    ];

    /// Human label shown above each bucket in the search dropdown
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Open => "Open Orders",
            Self::Shipped => "Shipped",
            Self::Rto => "RTO",
            Self::CodPending => "COD Pending",
            Self::Cancelled => "Cancelled",
            Self::Archived => "Archived",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Shipped => "shipped",
            Self::Rto => "rto",
            Self::CodPending => "cod_pending",
            Self::Cancelled => "cancelled",
            Self::Archived => "archived",
        }
    }
}

/// Sort fields allowed on the order listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    OrderDate,
    ArchivedAt,
    ShippedAt,
    CreatedAt,
}

impl SortField {
    pub fn from_param(s: &str) -> AppResult<Self> {
        match s {
            "order_date" => Ok(Self::OrderDate),
            "archived_at" => Ok(Self::ArchivedAt),
            "shipped_at" => Ok(Self::ShippedAt),
            "created_at" => Ok(Self::CreatedAt),
            other => Err(AppError::with_message(
                ErrorCode::InvalidSortField,
                format!("Sort field not allowed: {other}"),
            )),
        }
    }

    /// Column name; only reachable through the allow-list above
    pub fn column(&self) -> &'static str {
        match self {
            Self::OrderDate => "order_date",
            Self::ArchivedAt => "archived_at",
            Self::ShippedAt => "shipped_at",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Validated order listing parameters
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    pub view: OrderListView,
    pub sub_filter: Option<ShippedSubFilter>,
    pub search: Option<String>,
    pub days: Option<u32>,
    pub sort: SortField,
    pub page: u32,
    pub page_size: u32,
}

impl OrderListQuery {
    /// Clamp page/page-size into the allowed window
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn offset(&self) -> i64 {
        ((self.page - 1) as i64) * (self.page_size as i64)
    }
}

/// LIKE pattern for a substring search, escaping the wildcard characters
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn push_tracking_list(qb: &mut QueryBuilder<'_, Sqlite>, statuses: &[&str]) {
    qb.push("(");
    let mut sep = qb.separated(", ");
    for s in statuses {
        sep.push_bind(s.to_string());
    }
    qb.push(")");
}

/// `EXISTS` predicate over this order's lines with the given tracking set
fn push_exists_tracking_in(qb: &mut QueryBuilder<'_, Sqlite>, statuses: &[&str]) {
    qb.push(
        "EXISTS (SELECT 1 FROM order_line l WHERE l.order_id = o.id AND l.tracking_status IN ",
    );
    push_tracking_list(qb, statuses);
    qb.push(")");
}

/// Push the OR-search predicate: order number, customer name/email/phone,
/// and AWB number on any line — all substring matches.
pub fn push_search_clause(qb: &mut QueryBuilder<'_, Sqlite>, term: &str) {
    let pattern = like_pattern(term);
    qb.push("(o.order_number LIKE ");
    qb.push_bind(pattern.clone());
    qb.push(" ESCAPE '\\' OR o.customer_name LIKE ");
    qb.push_bind(pattern.clone());
    qb.push(" ESCAPE '\\' OR o.customer_email LIKE ");
    qb.push_bind(pattern.clone());
    qb.push(" ESCAPE '\\' OR o.customer_phone LIKE ");
    qb.push_bind(pattern.clone());
    qb.push(" ESCAPE '\\' OR EXISTS (SELECT 1 FROM order_line l WHERE l.order_id = o.id AND l.awb_number LIKE ");
    qb.push_bind(pattern);
    qb.push(" ESCAPE '\\'))");
}

/// Push the membership predicate for a primary listing view.
///
/// Exact business rules:
/// - `open`: status literal `'open'` OR (not released to shipped AND not
///   released to cancelled)
/// - `shipped`: `released_to_shipped`, optionally narrowed to RTO-tracking
///   lines or to COD-pending (COD, unremitted, at least one delivered line)
/// - `cancelled`: `released_to_cancelled`
pub fn push_view_clause(
    qb: &mut QueryBuilder<'_, Sqlite>,
    view: OrderListView,
    sub_filter: Option<ShippedSubFilter>,
) {
    match view {
        OrderListView::Open => {
            qb.push(
                "(o.status = 'open' OR (o.released_to_shipped = 0 AND o.released_to_cancelled = 0))",
            );
        }
        OrderListView::Shipped => {
            qb.push("o.released_to_shipped = 1");
            match sub_filter {
                Some(ShippedSubFilter::Rto) => {
                    qb.push(" AND ");
                    push_exists_tracking_in(qb, &RTO_TRACKING_STATUSES);
                }
                Some(ShippedSubFilter::CodPending) => {
                    qb.push(" AND o.payment_method = 'cod' AND o.cod_remitted_at IS NULL AND ");
                    push_exists_tracking_in(qb, &["delivered"]);
                }
                None => {}
            }
        }
        OrderListView::Cancelled => {
            qb.push("o.released_to_cancelled = 1");
        }
    }
}

/// Push the membership predicate for a search aggregator bucket.
///
/// `shipped` additionally excludes RTO-tracking lines; `rto` requires the
/// release flag AND an RTO-tracking line; `cod_pending` requires COD payment,
/// no remittance, and a delivered line.
pub fn push_bucket_clause(qb: &mut QueryBuilder<'_, Sqlite>, bucket: SearchBucket) {
    match bucket {
        SearchBucket::Open => {
            qb.push(
                "(o.status = 'open' OR (o.released_to_shipped = 0 AND o.released_to_cancelled = 0))",
            );
        }
        SearchBucket::Shipped => {
            qb.push("o.released_to_shipped = 1 AND NOT ");
            push_exists_tracking_in(qb, &RTO_TRACKING_STATUSES);
        }
        SearchBucket::Rto => {
            qb.push("o.released_to_shipped = 1 AND ");
            push_exists_tracking_in(qb, &RTO_TRACKING_STATUSES);
        }
        SearchBucket::CodPending => {
            qb.push("o.payment_method = 'cod' AND o.cod_remitted_at IS NULL AND ");
            push_exists_tracking_in(qb, &["delivered"]);
        }
        SearchBucket::Cancelled => {
            qb.push("o.released_to_cancelled = 1");
        }
        SearchBucket::Archived => {
            qb.push("o.is_archived = 1");
        }
    }
}

/// Push the membership predicate for a unified-search tab.
pub fn push_unified_clause(qb: &mut QueryBuilder<'_, Sqlite>, view: UnifiedView) {
    match view {
        UnifiedView::All => {
            qb.push("1 = 1");
        }
        UnifiedView::InTransit => {
            qb.push(
                "EXISTS (SELECT 1 FROM order_line l WHERE l.order_id = o.id \
                 AND l.line_status = 'shipped' \
                 AND (l.tracking_status IS NULL OR l.tracking_status NOT IN ",
            );
            push_tracking_list(qb, &TERMINAL_TRACKING_STATUSES);
            qb.push("))");
        }
        UnifiedView::Delivered => {
            push_exists_tracking_in(qb, &["delivered"]);
        }
        UnifiedView::Rto => {
            push_exists_tracking_in(qb, &RTO_TRACKING_STATUSES);
        }
        UnifiedView::Cancelled => {
            qb.push("o.released_to_cancelled = 1");
        }
        UnifiedView::Archived => {
            qb.push("o.is_archived = 1");
        }
    }
}

/// Push the full WHERE clause for a primary listing query.
pub fn push_list_filter(qb: &mut QueryBuilder<'_, Sqlite>, q: &OrderListQuery, now_millis: i64) {
    qb.push(" WHERE o.is_archived = 0 AND ");
    push_view_clause(qb, q.view, q.sub_filter);

    if let Some(ref term) = q.search {
        qb.push(" AND ");
        push_search_clause(qb, term);
    }

    if let Some(days) = q.days {
        let cutoff = now_millis - (days as i64) * 86_400_000;
        qb.push(" AND o.order_date >= ");
        qb.push_bind(cutoff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn from_param_rejects_unknown_values() {
        assert!(OrderListView::from_param("open").is_ok());
        assert!(OrderListView::from_param("closed").is_err());
        assert!(SortField::from_param("order_date").is_ok());
        // Not in the allow-list even though it is a real column
        assert!(SortField::from_param("total_amount").is_err());
        assert!(UnifiedView::from_param("in_transit").is_ok());
        assert!(UnifiedView::from_param("intransit").is_err());
        assert!(ShippedSubFilter::from_param("cod_pending").is_ok());
        assert!(ShippedSubFilter::from_param("cod").is_err());
    }

    #[test]
    fn normalized_clamps_paging() {
        let q = OrderListQuery {
            view: OrderListView::Open,
            sub_filter: None,
            search: None,
            days: None,
            sort: SortField::OrderDate,
            page: 0,
            page_size: 5000,
        }
        .normalized();
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, MAX_PAGE_SIZE);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn view_clause_renders_expected_sql() {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM orders o WHERE ");
        push_view_clause(&mut qb, OrderListView::Open, None);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM orders o WHERE (o.status = 'open' OR \
             (o.released_to_shipped = 0 AND o.released_to_cancelled = 0))"
        );
    }
}
