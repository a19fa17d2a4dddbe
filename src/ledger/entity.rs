//! [`LedgerEntity`] implementation for [`OrderEntry`].
//!
//! The admission key is the externally supplied `order_id`; the tracking number is the
//! ledger sequence; the admission time comes from the injected clock.

use crate::clock::SharedClock;
use crate::ledger::OrderError;
use crate::model::{OrderCandidate, OrderEntry, TrackingNumber};
use ledger_framework::LedgerEntity;

impl LedgerEntity for OrderEntry {
    type Key = String;
    type Candidate = OrderCandidate;
    type Context = SharedClock;
    type Error = OrderError;

    fn admission_key(candidate: &OrderCandidate) -> Option<String> {
        candidate.order_id.clone()
    }

    fn from_candidate(
        sequence: u64,
        candidate: OrderCandidate,
        clock: &SharedClock,
    ) -> Result<Self, OrderError> {
        Ok(OrderEntry::new(
            TrackingNumber::from(sequence),
            clock.now(),
            candidate,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use ledger_framework::{Admission, LedgerState, UnkeyedPolicy};
    use std::sync::Arc;

    fn clock() -> SharedClock {
        Arc::new(FixedClock(
            NaiveDate::from_ymd_opt(2025, 9, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        ))
    }

    #[test]
    fn test_tracking_numbers_follow_admissions() {
        let clock = clock();
        let mut ledger = LedgerState::<OrderEntry>::default();

        let first = ledger
            .admit(OrderCandidate::with_order_id("PO-1"), &clock)
            .unwrap();
        let dup = ledger
            .admit(OrderCandidate::with_order_id("PO-1"), &clock)
            .unwrap();
        let second = ledger
            .admit(OrderCandidate::with_order_id("PO-2"), &clock)
            .unwrap();

        assert_eq!(
            first.admitted().unwrap().internal_tracking_number.to_string(),
            "ITN-0000001"
        );
        assert!(matches!(dup, Admission::Rejected { key: Some(ref id) } if id == "PO-1"));
        assert_eq!(
            second.admitted().unwrap().internal_tracking_number.to_string(),
            "ITN-0000002"
        );
        assert_eq!(
            second.admitted().unwrap().extraction_time_display(),
            "2025-09-01 09:30:00"
        );
    }

    #[test]
    fn test_unidentified_orders_follow_policy() {
        let clock = clock();

        let mut strict = LedgerState::<OrderEntry>::new(UnkeyedPolicy::SingleSlot);
        assert!(strict.admit(OrderCandidate::default(), &clock).unwrap().is_admitted());
        assert!(!strict.admit(OrderCandidate::default(), &clock).unwrap().is_admitted());

        let mut lenient = LedgerState::<OrderEntry>::new(UnkeyedPolicy::AlwaysAdmit);
        assert!(lenient.admit(OrderCandidate::default(), &clock).unwrap().is_admitted());
        assert!(lenient.admit(OrderCandidate::default(), &clock).unwrap().is_admitted());
        assert_eq!(lenient.counter(), 2);
    }
}
