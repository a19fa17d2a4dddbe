//! # Report Rendering
//!
//! Plain-text renderings of intake outcomes for the terminal: the save confirmation, the
//! simulated new-order notification, the duplicate notice, and the item and history tables.
//! Missing values render as `N/A`; amounts render as whole yen with thousands separators.

use crate::model::{OrderCandidate, OrderEntry, OrderItem};
use tabled::{Table, Tabled};

const NOT_AVAILABLE: &str = "N/A";

/// Formats an amount as `¥45,000`, or `N/A` when unknown.
pub fn yen(amount: Option<i64>) -> String {
    let Some(amount) = amount else {
        return NOT_AVAILABLE.to_string();
    };
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

fn count(value: Option<i64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// The extracted candidate as pretty-printed JSON, under an `Extracted Data` heading.
pub fn extracted_data(candidate: &OrderCandidate) -> String {
    let body = serde_json::to_string_pretty(candidate)
        .unwrap_or_else(|e| format!("<candidate could not be rendered: {e}>"));
    format!("Extracted Data (JSON)\n{body}\n")
}

/// One-line confirmation that an entry was stored.
pub fn saved_message(entry: &OrderEntry) -> String {
    format!(
        "Order ID: {} order information saved to session. Internal Tracking No.: {}",
        text(entry.order_id.as_deref()),
        entry.internal_tracking_number
    )
}

/// The simulated new-order notification. Nothing is sent; the recipient is only displayed.
pub fn notification_message(entry: &OrderEntry, recipient: &str) -> String {
    format!(
        "[New Order Alert] - Internal Tracking No.: {tn}\n\
         \n\
         - Order ID: {order_id}\n\
         - Customer: {customer}\n\
         - Order Date: {date}\n\
         - Total Amount: {total}\n\
         - Delivery Address: {address}\n\
         - Notification Recipient (Simulated): {recipient}\n",
        tn = entry.internal_tracking_number,
        order_id = text(entry.order_id.as_deref()),
        customer = text(entry.customer_name.as_deref()),
        date = text(entry.order_date.as_deref()),
        total = yen(entry.total_amount),
        address = text(entry.delivery_address.as_deref()),
    )
}

/// Notice shown when a candidate was rejected as a duplicate.
pub fn duplicate_notice(order_id: Option<&str>) -> String {
    format!(
        "[Order Processing Skipped] - Order ID: {}\n- Reason: Duplicate Order ID found.\n",
        text(order_id)
    )
}

#[derive(Debug, Tabled)]
struct ItemRow {
    #[tabled(rename = "Product Name")]
    product_name: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

impl From<&OrderItem> for ItemRow {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_name: text(item.product_name.as_deref()),
            quantity: count(item.quantity),
            unit_price: yen(item.unit_price),
            subtotal: yen(item.subtotal()),
        }
    }
}

/// Item details of one order.
pub fn items_table(items: &[OrderItem]) -> String {
    if items.is_empty() {
        return "No item details were extracted.".to_string();
    }
    Table::new(items.iter().map(ItemRow::from)).to_string()
}

#[derive(Debug, Tabled)]
struct HistoryRow {
    #[tabled(rename = "Order ID")]
    order_id: String,
    #[tabled(rename = "Internal Tracking No.")]
    tracking_number: String,
    #[tabled(rename = "Customer Name")]
    customer_name: String,
    #[tabled(rename = "Order Date")]
    order_date: String,
    #[tabled(rename = "Total Amount")]
    total_amount: String,
    #[tabled(rename = "Delivery Address")]
    delivery_address: String,
    #[tabled(rename = "Extraction Time")]
    extraction_time: String,
}

impl From<&OrderEntry> for HistoryRow {
    fn from(entry: &OrderEntry) -> Self {
        Self {
            order_id: text(entry.order_id.as_deref()),
            tracking_number: entry.internal_tracking_number.to_string(),
            customer_name: text(entry.customer_name.as_deref()),
            order_date: text(entry.order_date.as_deref()),
            total_amount: yen(entry.total_amount),
            delivery_address: text(entry.delivery_address.as_deref()),
            extraction_time: entry.extraction_time_display(),
        }
    }
}

/// Order history, one row per entry, in the order given.
pub fn history_table(entries: &[OrderEntry]) -> String {
    if entries.is_empty() {
        return "No order information has been saved to the session yet.".to_string();
    }
    Table::new(entries.iter().map(HistoryRow::from)).to_string()
}
