use crate::ledger::OrderError;
use crate::model::{OrderCandidate, OrderEntry};
use async_trait::async_trait;
use ledger_framework::{Admission, FrameworkError, LedgerClient, LedgerReader};
use tracing::{debug, info, instrument};

/// Client for the order ledger.
///
/// Turns the framework's admission outcome into the order vocabulary: an admitted entry, or
/// [`OrderError::DuplicateOrderId`]. Reads (`list_entries`, `find`, `stats`) come from
/// [`LedgerReader`].
#[derive(Clone)]
pub struct OrderLedgerClient {
    inner: LedgerClient<OrderEntry>,
}

impl OrderLedgerClient {
    pub fn new(inner: LedgerClient<OrderEntry>) -> Self {
        Self { inner }
    }

    /// Admits a candidate, returning the stored entry with its tracking number.
    #[instrument(skip(self, candidate), fields(order_id = ?candidate.order_id))]
    pub async fn admit(&self, candidate: OrderCandidate) -> Result<OrderEntry, OrderError> {
        debug!("Sending admit to ledger");
        match self.inner.admit(candidate).await.map_err(Self::map_error)? {
            Admission::Admitted(entry) => {
                info!(tracking_number = %entry.internal_tracking_number, "Order admitted");
                Ok(entry)
            }
            Admission::Rejected { key } => Err(OrderError::DuplicateOrderId { order_id: key }),
        }
    }
}

#[async_trait]
impl LedgerReader<OrderEntry> for OrderLedgerClient {
    type Error = OrderError;

    fn inner(&self) -> &LedgerClient<OrderEntry> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OrderError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(order_error) => *order_error,
                Err(other) => OrderError::LedgerUnavailable(other.to_string()),
            },
            other => OrderError::LedgerUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrackingNumber;
    use chrono::NaiveDate;
    use ledger_framework::mock::{create_mock_client, expect_admit, MockClient};
    use ledger_framework::{LedgerStats, ListOrder};

    fn entry(sequence: u64, order_id: &str) -> OrderEntry {
        let at = NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        OrderEntry::new(
            TrackingNumber(sequence),
            at,
            OrderCandidate::with_order_id(order_id),
        )
    }

    #[tokio::test]
    async fn test_admit_sends_candidate_to_ledger() {
        let (inner, mut receiver) = create_mock_client::<OrderEntry>(4);
        let client = OrderLedgerClient::new(inner);

        let task = tokio::spawn(async move {
            client.admit(OrderCandidate::with_order_id("PO-1")).await
        });

        let (candidate, responder) = expect_admit(&mut receiver)
            .await
            .expect("expected an admit request");
        assert_eq!(candidate.order_id.as_deref(), Some("PO-1"));
        responder
            .send(Ok(Admission::Admitted(entry(1, "PO-1"))))
            .unwrap();

        let admitted = task.await.unwrap().unwrap();
        assert_eq!(admitted.internal_tracking_number.to_string(), "ITN-0000001");
    }

    #[tokio::test]
    async fn test_rejection_becomes_duplicate_order_id() {
        let mut mock = MockClient::<OrderEntry>::new();
        mock.expect_admit().return_rejected(Some("PO-1".to_string()));
        mock.expect_admit().return_rejected(None);

        let client = OrderLedgerClient::new(mock.client());
        assert_eq!(
            client.admit(OrderCandidate::with_order_id("PO-1")).await,
            Err(OrderError::DuplicateOrderId {
                order_id: Some("PO-1".to_string())
            })
        );
        assert_eq!(
            client.admit(OrderCandidate::default()).await,
            Err(OrderError::DuplicateOrderId { order_id: None })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_framework_errors_map_to_ledger_unavailable() {
        let mut mock = MockClient::<OrderEntry>::new();
        mock.expect_admit().return_err(FrameworkError::ActorClosed);
        mock.expect_list().return_err(FrameworkError::ActorDropped);

        let client = OrderLedgerClient::new(mock.client());
        assert!(matches!(
            client.admit(OrderCandidate::with_order_id("PO-1")).await,
            Err(OrderError::LedgerUnavailable(_))
        ));
        assert!(matches!(
            client.list_entries(ListOrder::Insertion).await,
            Err(OrderError::LedgerUnavailable(_))
        ));
        mock.verify();
    }

    #[test]
    fn test_entity_errors_are_unwrapped() {
        let original = OrderError::LedgerUnavailable("clock stopped".into());
        let mapped =
            OrderLedgerClient::map_error(FrameworkError::EntityError(Box::new(original.clone())));
        assert_eq!(mapped, original);
    }

    #[tokio::test]
    async fn test_reads_pass_through() {
        let mut mock = MockClient::<OrderEntry>::new();
        mock.expect_list()
            .return_ok(vec![entry(2, "PO-2"), entry(1, "PO-1")]);
        mock.expect_find().return_ok(Some(entry(1, "PO-1")));
        mock.expect_stats().return_ok(LedgerStats {
            admitted: 2,
            entries: 2,
            rejected: 1,
        });

        let client = OrderLedgerClient::new(mock.client());
        let listed = client.list_entries(ListOrder::Reverse).await.unwrap();
        assert_eq!(listed[0].order_id.as_deref(), Some("PO-2"));
        let found = client.find("PO-1".to_string()).await.unwrap().unwrap();
        assert_eq!(found.internal_tracking_number, TrackingNumber(1));
        assert_eq!(client.stats().await.unwrap().rejected, 1);
        mock.verify();
    }
}
