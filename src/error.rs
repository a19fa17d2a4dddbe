//! Top-level error type of the intake pipeline.

use crate::config::ConfigError;
use crate::extraction::ExtractionError;
use crate::ledger::OrderError;
use thiserror::Error;

/// Errors surfaced by [`IntakeSystem`](crate::lifecycle::IntakeSystem).
///
/// Each stage keeps its own error type; this enum only says which stage failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntakeError {
    /// The submitted email body was empty or whitespace only. No model call was made.
    #[error("Please paste the email body.")]
    EmptyEmail,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Order(#[from] OrderError),

    /// The ledger task did not stop cleanly.
    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}

impl IntakeError {
    /// True when the failure was a duplicate order id, which callers report as a skipped
    /// order rather than an error.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, IntakeError::Order(OrderError::DuplicateOrderId { .. }))
    }
}
