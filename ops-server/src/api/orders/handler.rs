//! Order API Handlers
//!
//! Read-only access to orders. Entities are written by the upstream
//! ingestion process; this surface lists, searches, and projects them.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::order;
use crate::listing::filter::{
    OrderListQuery, OrderListView, ShippedSubFilter, SortField, UnifiedView,
};
use crate::listing::flatten::{FlatOrderRow, flatten_orders};
use crate::utils::validation::{MAX_SEARCH_LEN, validate_optional_text};
use crate::utils::{AppResult, ok};
use shared::models::{Customer, Order, OrderLineDetail};
use shared::util::now_millis;
use shared::{ApiResponse, AppError, ErrorCode, Paginated};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_view")]
    pub view: String,
    pub sub_filter: Option<String>,
    pub search: Option<String>,
    pub days: Option<u32>,
    pub sort: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_view() -> String {
    "open".to_string()
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

/// Load lines and customers for a page of orders and flatten to grid rows
async fn flatten_page(
    state: &ServerState,
    orders: &[Order],
    now: i64,
) -> AppResult<Vec<FlatOrderRow>> {
    let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let customer_ids: Vec<i64> = orders.iter().filter_map(|o| o.customer_id).collect();

    let (lines, customers) = tokio::try_join!(
        order::lines_for_orders(&state.pool, &order_ids),
        order::customers_by_ids(&state.pool, &customer_ids),
    )
    .map_err(AppError::from)?;

    let mut lines_by_order: HashMap<i64, Vec<OrderLineDetail>> = HashMap::new();
    for line in lines {
        lines_by_order.entry(line.order_id).or_default().push(line);
    }
    let customers_by_id: HashMap<i64, Customer> =
        customers.into_iter().map(|c| (c.id, c)).collect();

    Ok(flatten_orders(orders, &lines_by_order, &customers_by_id, now))
}

/// GET /api/orders — list one view as flat grid rows
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Paginated<FlatOrderRow>>>> {
    validate_optional_text(&query.search, "search", MAX_SEARCH_LEN)?;

    let q = OrderListQuery {
        view: OrderListView::from_param(&query.view)?,
        sub_filter: query
            .sub_filter
            .as_deref()
            .map(ShippedSubFilter::from_param)
            .transpose()?,
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
        days: query.days,
        sort: query
            .sort
            .as_deref()
            .map(SortField::from_param)
            .transpose()?
            .unwrap_or(SortField::OrderDate),
        page: query.page,
        page_size: query.page_size,
    }
    .normalized();

    let now = now_millis();
    let (orders, total) = order::list(&state.pool, &q, now)
        .await
        .map_err(AppError::from)?;

    let rows = flatten_page(&state, &orders, now).await?;
    Ok(ok(Paginated::new(rows, q.page, q.page_size, total)))
}

/// GET /api/orders/{id} — full order detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<order::OrderDetail>>> {
    let found = order::find_by_id(&state.pool, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
        })?;
    let detail = order::load_detail(&state.pool, found)
        .await
        .map_err(AppError::from)?;
    Ok(ok(detail))
}

/// GET /api/orders/number/{order_number} — detail by human order number
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<ApiResponse<order::OrderDetail>>> {
    let found = order::find_by_number(&state.pool, &order_number)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {order_number} not found"),
            )
        })?;
    let detail = order::load_detail(&state.pool, found)
        .await
        .map_err(AppError::from)?;
    Ok(ok(detail))
}

/// Query params for unified search
#[derive(Debug, Deserialize)]
pub struct UnifiedQuery {
    #[serde(default = "default_tab")]
    pub view: String,
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_tab() -> String {
    "all".to_string()
}

/// GET /api/orders/search-unified — flattened rows across all views
pub async fn search_unified(
    State(state): State<ServerState>,
    Query(query): Query<UnifiedQuery>,
) -> AppResult<Json<ApiResponse<Paginated<FlatOrderRow>>>> {
    validate_optional_text(&query.search, "search", MAX_SEARCH_LEN)?;
    let view = UnifiedView::from_param(&query.view)?;
    let search = query.search.as_deref().filter(|s| !s.trim().is_empty());

    let (orders, total) =
        order::unified_list(&state.pool, view, search, query.page, query.page_size)
            .await
            .map_err(AppError::from)?;

    let page = query.page.max(1);
    let page_size = query
        .page_size
        .clamp(1, crate::listing::filter::MAX_PAGE_SIZE);

    let rows = flatten_page(&state, &orders, now_millis()).await?;
    Ok(ok(Paginated::new(rows, page, page_size, total)))
}
