//! Grid row flattener
//!
//! Projects the nested Order → OrderLine (→ SKU → Variation → Product,
//! → FabricColour, → ProductionBatch) graph into one flat record per line,
//! or one placeholder record for an order with zero lines. Pure transform:
//! the same input graph always yields the same rows.

use std::collections::HashMap;

use serde::Serialize;

use shared::models::{Customer, LineStatus, Order, OrderLineDetail};
use shared::util::days_since;

/// One row of the order grid
#[derive(Debug, Clone, Serialize)]
pub struct FlatOrderRow {
    // Order-level fields, repeated on every row of the order
    pub order_id: i64,
    pub order_number: String,
    pub order_date: i64,
    pub ship_by_date: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_tags: Vec<String>,
    pub city: String,
    pub payment_method: Option<String>,
    pub sales_channel: Option<String>,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub is_exchange: bool,
    pub fulfillment_stage: String,
    /// Order chrome renders only on the row where this is set
    pub is_first_line: bool,
    pub total_lines: usize,
    // Line-level fields; None/zeroed on the placeholder row
    pub line_id: Option<i64>,
    pub product_name: Option<String>,
    pub variation_colour: Option<String>,
    pub sku_code: Option<String>,
    pub sku_size: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub mrp: f64,
    pub discount_percent: i64,
    pub margin_percent: i64,
    pub line_status: Option<LineStatus>,
    pub awb_number: Option<String>,
    pub courier: Option<String>,
    pub tracking_status: Option<String>,
    pub last_scan_location: Option<String>,
    pub days_in_transit: Option<i64>,
    pub days_since_delivery: Option<i64>,
    pub days_in_rto: Option<i64>,
    pub rto_status: Option<&'static str>,
    /// Tri-state: None = no BOM fabric link, Some(flag) = linked.
    /// Never collapsed to a plain bool.
    pub fabric_out_of_stock: Option<bool>,
    pub is_custom: bool,
    pub batch_code: Option<String>,
    pub batch_status: Option<String>,
    pub return_status: Option<String>,
    pub return_quantity: Option<i64>,
}

/// Discount percent off MRP, rounded to the nearest integer.
///
/// 0 whenever `mrp <= 0` or `price >= mrp`.
pub fn discount_percent(mrp: f64, price: f64) -> i64 {
    if mrp > 0.0 && price < mrp {
        ((mrp - price) / mrp * 100.0).round() as i64
    } else {
        0
    }
}

/// Margin percent over the BOM cost, rounded to the nearest integer.
///
/// 0 whenever `price <= 0` or no BOM cost exists.
pub fn margin_percent(price: f64, bom_cost: Option<f64>) -> i64 {
    match bom_cost {
        Some(cost) if price > 0.0 => (((price - cost) / price) * 100.0).round() as i64,
        _ => 0,
    }
}

/// Lenient customer-tag decode: JSON array of strings if possible, else
/// comma-split and trimmed. Failures fall back silently.
pub fn parse_customer_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return vec![];
    };
    if let Ok(tags) = serde_json::from_str::<Vec<String>>(raw) {
        return tags;
    }
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Extract the city from the serialized shipping address; `'-'` on any
/// parse failure or absence.
pub fn city_from_address(raw: Option<&str>) -> String {
    raw.and_then(|s| serde_json::from_str::<serde_json::Value>(s).ok())
        .and_then(|v| v.get("city").and_then(|c| c.as_str()).map(String::from))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "-".to_string())
}

/// Derived per-line RTO status
pub fn rto_status(line: &OrderLineDetail) -> Option<&'static str> {
    if line.rto_received_at.is_some() {
        Some("received")
    } else if line.rto_initiated_at.is_some() {
        Some("in_transit")
    } else {
        None
    }
}

/// Order fulfillment stage — pure function of the multiset of line statuses.
///
/// All packed → ready_to_ship; any picked/packed → in_progress; all
/// allocated → allocated; else pending. Zero lines → pending.
pub fn fulfillment_stage(lines: &[OrderLineDetail]) -> &'static str {
    if lines.is_empty() {
        return "pending";
    }
    if lines.iter().all(|l| l.line_status == LineStatus::Packed) {
        return "ready_to_ship";
    }
    if lines
        .iter()
        .any(|l| matches!(l.line_status, LineStatus::Picked | LineStatus::Packed))
    {
        return "in_progress";
    }
    if lines.iter().all(|l| l.line_status == LineStatus::Allocated) {
        return "allocated";
    }
    "pending"
}

/// Flatten orders with their loaded lines and customers into grid rows.
///
/// `now_millis` is injected so the day counters are deterministic.
pub fn flatten_orders(
    orders: &[Order],
    lines_by_order: &HashMap<i64, Vec<OrderLineDetail>>,
    customers_by_id: &HashMap<i64, Customer>,
    now_millis: i64,
) -> Vec<FlatOrderRow> {
    let mut rows = Vec::new();

    for order in orders {
        let lines = lines_by_order
            .get(&order.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let customer = order.customer_id.and_then(|id| customers_by_id.get(&id));
        let customer_tags = parse_customer_tags(customer.and_then(|c| c.tags.as_deref()));
        let city = city_from_address(order.shipping_address.as_deref());
        let stage = fulfillment_stage(lines);

        if lines.is_empty() {
            rows.push(placeholder_row(order, customer_tags, city, stage));
            continue;
        }

        for (idx, line) in lines.iter().enumerate() {
            rows.push(FlatOrderRow {
                order_id: order.id,
                order_number: order.order_number.clone(),
                order_date: order.order_date,
                ship_by_date: order.ship_by_date,
                customer_name: order.customer_name.clone(),
                customer_email: order.customer_email.clone(),
                customer_phone: order.customer_phone.clone(),
                customer_tags: customer_tags.clone(),
                city: city.clone(),
                payment_method: order.payment_method.clone(),
                sales_channel: order.sales_channel.clone(),
                total_amount: order.total_amount,
                notes: order.notes.clone(),
                is_exchange: order.is_exchange,
                fulfillment_stage: stage.to_string(),
                is_first_line: idx == 0,
                total_lines: lines.len(),
                line_id: Some(line.id),
                product_name: Some(line.product_name.clone()),
                variation_colour: line.variation_colour.clone(),
                sku_code: Some(line.sku_code.clone()),
                sku_size: line.sku_size.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                mrp: line.mrp,
                discount_percent: discount_percent(line.mrp, line.unit_price),
                margin_percent: margin_percent(line.unit_price, line.bom_cost),
                line_status: Some(line.line_status),
                awb_number: line.awb_number.clone(),
                courier: line.courier.clone(),
                tracking_status: line.tracking_status.clone(),
                last_scan_location: line.last_scan_location.clone(),
                days_in_transit: line.shipped_at.map(|t| days_since(t, now_millis)),
                days_since_delivery: line.delivered_at.map(|t| days_since(t, now_millis)),
                days_in_rto: line.rto_initiated_at.map(|t| days_since(t, now_millis)),
                rto_status: rto_status(line),
                fabric_out_of_stock: line.fabric_out_of_stock,
                is_custom: line.is_custom,
                batch_code: line.batch_code.clone(),
                batch_status: line.batch_status.clone(),
                return_status: line.return_status.clone(),
                return_quantity: line.return_quantity,
            });
        }
    }

    rows
}

fn placeholder_row(
    order: &Order,
    customer_tags: Vec<String>,
    city: String,
    stage: &'static str,
) -> FlatOrderRow {
    FlatOrderRow {
        order_id: order.id,
        order_number: order.order_number.clone(),
        order_date: order.order_date,
        ship_by_date: order.ship_by_date,
        customer_name: order.customer_name.clone(),
        customer_email: order.customer_email.clone(),
        customer_phone: order.customer_phone.clone(),
        customer_tags,
        city,
        payment_method: order.payment_method.clone(),
        sales_channel: order.sales_channel.clone(),
        total_amount: order.total_amount,
        notes: order.notes.clone(),
        is_exchange: order.is_exchange,
        fulfillment_stage: stage.to_string(),
        is_first_line: true,
        total_lines: 0,
        line_id: None,
        product_name: None,
        variation_colour: None,
        sku_code: None,
        sku_size: None,
        quantity: 0,
        unit_price: 0.0,
        mrp: 0.0,
        discount_percent: 0,
        margin_percent: 0,
        line_status: None,
        awb_number: None,
        courier: None,
        tracking_status: None,
        last_scan_location: None,
        days_in_transit: None,
        days_since_delivery: None,
        days_in_rto: None,
        rto_status: None,
        fabric_out_of_stock: None,
        is_custom: false,
        batch_code: None,
        batch_status: None,
        return_status: None,
        return_quantity: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    fn order(id: i64) -> Order {
        Order {
            id,
            order_number: format!("#{:04}", 1000 + id),
            status: "open".to_string(),
            order_date: 1_700_000_000_000,
            ship_by_date: None,
            customer_id: None,
            customer_name: Some("Asha Rao".to_string()),
            customer_email: Some("asha@example.com".to_string()),
            customer_phone: Some("9876500000".to_string()),
            shipping_address: Some(r#"{"line1":"12 MG Road","city":"Bengaluru"}"#.to_string()),
            total_amount: 2499.0,
            payment_method: Some("cod".to_string()),
            sales_channel: Some("online".to_string()),
            notes: None,
            is_archived: false,
            released_to_shipped: false,
            released_to_cancelled: false,
            is_exchange: false,
            exchange_of_order_id: None,
            cod_remitted_at: None,
            shipped_at: None,
            archived_at: None,
            created_at: 1_700_000_000_000,
        }
    }

    fn line(id: i64, order_id: i64, status: LineStatus) -> OrderLineDetail {
        OrderLineDetail {
            id,
            order_id,
            sku_id: 10,
            quantity: 1,
            unit_price: 1999.0,
            line_status: status,
            awb_number: None,
            courier: None,
            shipped_at: None,
            delivered_at: None,
            tracking_status: None,
            last_scan_at: None,
            last_scan_location: None,
            rto_initiated_at: None,
            rto_received_at: None,
            return_status: None,
            return_quantity: None,
            is_custom: false,
            sku_code: "KRT-RED-M".to_string(),
            sku_size: Some("M".to_string()),
            mrp: 2499.0,
            variation_colour: Some("Red".to_string()),
            variation_image_url: None,
            product_name: "Block Print Kurta".to_string(),
            bom_cost: Some(600.0),
            fabric_colour_name: Some("Madder Red".to_string()),
            fabric_out_of_stock: Some(false),
            batch_code: None,
            batch_status: None,
        }
    }

    #[test]
    fn zero_line_order_emits_one_placeholder() {
        let orders = vec![order(1)];
        let rows = flatten_orders(&orders, &HashMap::new(), &HashMap::new(), 0);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.total_lines, 0);
        assert!(row.is_first_line);
        assert_eq!(row.quantity, 0);
        assert_eq!(row.unit_price, 0.0);
        assert!(row.line_id.is_none());
        assert_eq!(row.fulfillment_stage, "pending");
    }

    #[test]
    fn n_lines_emit_n_rows_with_one_first() {
        let orders = vec![order(1)];
        let mut lines = HashMap::new();
        lines.insert(
            1,
            vec![
                line(1, 1, LineStatus::Pending),
                line(2, 1, LineStatus::Pending),
                line(3, 1, LineStatus::Pending),
            ],
        );
        let rows = flatten_orders(&orders, &lines, &HashMap::new(), 0);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().filter(|r| r.is_first_line).count(), 1);
        assert!(rows.iter().all(|r| r.total_lines == 3));
    }

    #[test]
    fn discount_percent_boundaries() {
        // price == mrp → 0
        assert_eq!(discount_percent(1000.0, 1000.0), 0);
        // price slightly below mrp → small positive integer
        assert_eq!(discount_percent(1000.0, 995.0), 1);
        // mrp <= 0 → 0
        assert_eq!(discount_percent(0.0, 500.0), 0);
        assert_eq!(discount_percent(-10.0, 5.0), 0);
        // price above mrp → 0
        assert_eq!(discount_percent(1000.0, 1200.0), 0);
        // ordinary case, rounded
        assert_eq!(discount_percent(2499.0, 1999.0), 20);
    }

    #[test]
    fn margin_percent_requires_price_and_cost() {
        assert_eq!(margin_percent(1999.0, Some(600.0)), 70);
        assert_eq!(margin_percent(0.0, Some(600.0)), 0);
        assert_eq!(margin_percent(1999.0, None), 0);
        // negative margin is reported, not clamped
        assert_eq!(margin_percent(500.0, Some(600.0)), -20);
    }

    #[test]
    fn fabric_tri_state_is_preserved() {
        let orders = vec![order(1)];
        let mut no_bom = line(1, 1, LineStatus::Pending);
        no_bom.bom_cost = None;
        no_bom.fabric_out_of_stock = None;
        let mut in_stock = line(2, 1, LineStatus::Pending);
        in_stock.fabric_out_of_stock = Some(false);
        let mut stocked_out = line(3, 1, LineStatus::Pending);
        stocked_out.fabric_out_of_stock = Some(true);

        let mut lines = HashMap::new();
        lines.insert(1, vec![no_bom, in_stock, stocked_out]);
        let rows = flatten_orders(&orders, &lines, &HashMap::new(), 0);
        // a SKU with no BOM fabric link is None, never Some(false)
        assert_eq!(rows[0].fabric_out_of_stock, None);
        assert_eq!(rows[1].fabric_out_of_stock, Some(false));
        assert_eq!(rows[2].fabric_out_of_stock, Some(true));
    }

    #[test]
    fn day_counters_floor_and_stay_none_when_absent() {
        let now = 10 * DAY_MS;
        let orders = vec![order(1)];
        let mut l = line(1, 1, LineStatus::Shipped);
        l.shipped_at = Some(7 * DAY_MS + 1000);
        l.delivered_at = None;
        l.rto_initiated_at = Some(9 * DAY_MS);
        let mut lines = HashMap::new();
        lines.insert(1, vec![l]);
        let rows = flatten_orders(&orders, &lines, &HashMap::new(), now);
        assert_eq!(rows[0].days_in_transit, Some(2));
        assert_eq!(rows[0].days_since_delivery, None);
        assert_eq!(rows[0].days_in_rto, Some(1));
    }

    #[test]
    fn customer_tags_lenient_parse() {
        assert_eq!(
            parse_customer_tags(Some(r#"["vip","repeat"]"#)),
            vec!["vip", "repeat"]
        );
        assert_eq!(
            parse_customer_tags(Some("vip, repeat ,  cod-risk")),
            vec!["vip", "repeat", "cod-risk"]
        );
        // malformed JSON falls back to comma-split
        assert_eq!(parse_customer_tags(Some(r#"["vip", "#)), vec![r#"["vip""#]);
        assert!(parse_customer_tags(None).is_empty());
        assert!(parse_customer_tags(Some("")).is_empty());
    }

    #[test]
    fn city_extraction_falls_back_to_dash() {
        assert_eq!(
            city_from_address(Some(r#"{"city":"Jaipur"}"#)),
            "Jaipur"
        );
        assert_eq!(city_from_address(Some(r#"{"pincode":"302001"}"#)), "-");
        assert_eq!(city_from_address(Some("not json")), "-");
        assert_eq!(city_from_address(None), "-");
        assert_eq!(city_from_address(Some(r#"{"city":""}"#)), "-");
    }

    #[test]
    fn fulfillment_stage_from_line_multiset() {
        let packed = vec![line(1, 1, LineStatus::Packed), line(2, 1, LineStatus::Packed)];
        assert_eq!(fulfillment_stage(&packed), "ready_to_ship");

        let mixed = vec![line(1, 1, LineStatus::Picked), line(2, 1, LineStatus::Pending)];
        assert_eq!(fulfillment_stage(&mixed), "in_progress");

        let allocated = vec![
            line(1, 1, LineStatus::Allocated),
            line(2, 1, LineStatus::Allocated),
        ];
        assert_eq!(fulfillment_stage(&allocated), "allocated");

        let pending = vec![line(1, 1, LineStatus::Pending), line(2, 1, LineStatus::Allocated)];
        assert_eq!(fulfillment_stage(&pending), "pending");

        assert_eq!(fulfillment_stage(&[]), "pending");
    }

    #[test]
    fn rto_status_is_derived() {
        let mut l = line(1, 1, LineStatus::Shipped);
        assert_eq!(rto_status(&l), None);
        l.rto_initiated_at = Some(1);
        assert_eq!(rto_status(&l), Some("in_transit"));
        l.rto_received_at = Some(2);
        assert_eq!(rto_status(&l), Some("received"));
    }

    #[test]
    fn flatten_is_idempotent() {
        let orders = vec![order(1), order(2)];
        let mut lines = HashMap::new();
        lines.insert(1, vec![line(1, 1, LineStatus::Pending)]);
        let a = flatten_orders(&orders, &lines, &HashMap::new(), 1234);
        let b = flatten_orders(&orders, &lines, &HashMap::new(), 1234);
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
    }
}
