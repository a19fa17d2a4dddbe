//! Error types for the order ledger.

use thiserror::Error;

/// Errors that can occur when admitting or reading orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// An order with the same identifier has already been admitted this session.
    ///
    /// `order_id` is `None` when the rejected candidate had no identifier and an unidentified
    /// order was already recorded.
    #[error("Order ID {} already exists in the session", .order_id.as_deref().unwrap_or("N/A"))]
    DuplicateOrderId { order_id: Option<String> },

    /// The ledger actor could not be reached or failed to answer.
    #[error("Order ledger unavailable: {0}")]
    LedgerUnavailable(String),
}
