//! The admitted, immutable order record.

use crate::model::{OrderCandidate, OrderItem};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Format used for [`OrderEntry::extraction_time`] wherever it is rendered.
pub const EXTRACTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ledger-assigned identifier, rendered as `ITN-` followed by a 7-digit zero-padded counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackingNumber(pub u64);

impl From<u64> for TrackingNumber {
    fn from(sequence: u64) -> Self {
        Self(sequence)
    }
}

impl Display for TrackingNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ITN-{:07}", self.0)
    }
}

impl Serialize for TrackingNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An order accepted into the session ledger.
///
/// Carries the candidate's fields, the tracking number assigned on admission, the admission
/// time (second precision) and the untouched candidate for audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderEntry {
    pub internal_tracking_number: TrackingNumber,
    pub order_id: Option<String>,
    pub order_date: Option<String>,
    pub customer_name: Option<String>,
    pub total_amount: Option<i64>,
    pub delivery_address: Option<String>,
    pub items: Vec<OrderItem>,
    #[serde(serialize_with = "serialize_extraction_time")]
    pub extraction_time: NaiveDateTime,
    pub raw_candidate: OrderCandidate,
}

impl OrderEntry {
    /// Builds the record for an accepted candidate.
    pub fn new(
        tracking_number: TrackingNumber,
        extraction_time: NaiveDateTime,
        candidate: OrderCandidate,
    ) -> Self {
        Self {
            internal_tracking_number: tracking_number,
            order_id: candidate.order_id.clone(),
            order_date: candidate.order_date.clone(),
            customer_name: candidate.customer_name.clone(),
            total_amount: candidate.total_amount,
            delivery_address: candidate.delivery_address.clone(),
            items: candidate.items.clone(),
            extraction_time,
            raw_candidate: candidate,
        }
    }

    /// Admission time rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn extraction_time_display(&self) -> String {
        self.extraction_time
            .format(EXTRACTION_TIME_FORMAT)
            .to_string()
    }
}

fn serialize_extraction_time<S: Serializer>(
    time: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(EXTRACTION_TIME_FORMAT))
}
