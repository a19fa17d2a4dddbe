//! The untrusted order shape produced by extraction.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An order as extracted from an email, before the ledger has accepted it.
///
/// Every field is optional: a model that cannot find a value returns `null`, and a missing
/// value is valid partial data, not an error. Keys the model returns beyond the known schema
/// are kept in [`extra`](OrderCandidate::extra) so the candidate stays a faithful copy of
/// what was extracted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderCandidate {
    #[serde(default, deserialize_with = "lenient_text")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub order_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub delivery_address: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<OrderItem>,
    /// Any additional keys returned by the model, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One line item of an order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub unit_price: Option<i64>,
}

impl OrderItem {
    /// `quantity * unit_price` when both are known and the product does not overflow.
    pub fn subtotal(&self) -> Option<i64> {
        self.quantity?.checked_mul(self.unit_price?)
    }
}

impl OrderCandidate {
    /// Convenience constructor for a candidate carrying only an order id.
    pub fn with_order_id(order_id: impl Into<String>) -> Self {
        Self {
            order_id: Some(order_id.into()),
            ..Self::default()
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<OrderItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<OrderItem>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Text fields are usually JSON strings, but an order number such as `20250901` may come
/// back as a number. Numbers and booleans are kept in their JSON spelling.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

/// Integer fields arrive as JSON integers most of the time, but models also produce
/// `45000.0`, `"45,000"` or `"¥45,000"`. All are accepted when they denote a whole number.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
                    _ => Err(D::Error::custom(format!("expected a whole number, got {n}"))),
                }
            }
        }
        Some(Value::String(s)) => {
            let unprefixed = s.trim().trim_start_matches(['¥', '￥', '$']).trim_start();
            let digits: String = unprefixed
                .chars()
                .filter(|c| *c != ',' && *c != '_')
                .collect();
            let digits = digits.trim();
            if digits.is_empty() {
                return Ok(None);
            }
            digits
                .parse::<i64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a whole number, got {s:?}")))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected a whole number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_are_none() {
        let candidate: OrderCandidate = serde_json::from_value(json!({ "order_id": "PO-1" })).unwrap();
        assert_eq!(candidate.order_id.as_deref(), Some("PO-1"));
        assert!(candidate.customer_name.is_none());
        assert!(candidate.total_amount.is_none());
        assert!(candidate.items.is_empty());
        assert!(candidate.extra.is_empty());
    }

    #[test]
    fn test_null_items_become_empty() {
        let candidate: OrderCandidate =
            serde_json::from_value(json!({ "order_id": null, "items": null })).unwrap();
        assert!(candidate.order_id.is_none());
        assert!(candidate.items.is_empty());
    }

    #[test]
    fn test_amounts_accept_whole_floats_and_strings() {
        let candidate: OrderCandidate = serde_json::from_value(json!({
            "total_amount": "45,000",
            "items": [{ "product_name": "Pen", "quantity": 2.0, "unit_price": 50 }]
        }))
        .unwrap();
        assert_eq!(candidate.total_amount, Some(45_000));
        assert_eq!(candidate.items[0].quantity, Some(2));
        assert_eq!(candidate.items[0].subtotal(), Some(100));
    }

    #[test]
    fn test_text_fields_accept_numbers() {
        let candidate: OrderCandidate = serde_json::from_value(json!({
            "order_id": 20250901,
            "customer_name": null,
            "delivery_address": true,
            "items": [{ "product_name": 4711, "quantity": 1 }]
        }))
        .unwrap();
        assert_eq!(candidate.order_id.as_deref(), Some("20250901"));
        assert!(candidate.customer_name.is_none());
        assert_eq!(candidate.delivery_address.as_deref(), Some("true"));
        assert_eq!(candidate.items[0].product_name.as_deref(), Some("4711"));
    }

    #[test]
    fn test_nested_text_value_is_rejected() {
        let result = serde_json::from_value::<OrderCandidate>(json!({ "order_id": ["PO-1"] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_currency_prefixed_amounts() {
        let candidate: OrderCandidate = serde_json::from_value(json!({
            "total_amount": " ¥45,000 ",
            "items": [{ "unit_price": "$ 1,200", "quantity": "3" }]
        }))
        .unwrap();
        assert_eq!(candidate.total_amount, Some(45_000));
        assert_eq!(candidate.items[0].unit_price, Some(1_200));
        assert_eq!(candidate.items[0].subtotal(), Some(3_600));
    }

    #[test]
    fn test_fractional_amount_is_rejected() {
        let result = serde_json::from_value::<OrderCandidate>(json!({ "total_amount": 12.5 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_keys_are_retained() {
        let raw = json!({ "order_id": "PO-9", "currency": "JPY" });
        let candidate: OrderCandidate = serde_json::from_value(raw).unwrap();
        assert_eq!(candidate.extra.get("currency"), Some(&json!("JPY")));

        let back = serde_json::to_value(&candidate).unwrap();
        assert_eq!(back["currency"], json!("JPY"));
        assert_eq!(back["customer_name"], Value::Null);
    }

    #[test]
    fn test_subtotal_needs_both_values() {
        let item = OrderItem {
            product_name: Some("Paper".into()),
            quantity: Some(10),
            unit_price: None,
        };
        assert_eq!(item.subtotal(), None);
    }
}
