//! # LedgerReader Trait
//!
//! Provides the read half of a ledger (`list_entries`, `find`, `stats`) to domain-specific
//! clients that wrap a generic [`LedgerClient`]. The wrapper only supplies access to the
//! inner client and an error mapping.
use crate::{FrameworkError, LedgerClient, LedgerEntity, LedgerStats, ListOrder};
use async_trait::async_trait;

/// Trait for domain clients to inherit the standard ledger read operations.
///
/// # Example
///
/// ```rust
/// use ledger_framework::{FrameworkError, LedgerClient, LedgerEntity, LedgerReader};
///
/// #[derive(Clone, Debug)]
/// struct Ticket { seq: u64 }
/// #[derive(Debug, thiserror::Error)]
/// #[error("ticket error: {0}")]
/// struct TicketError(String);
///
/// impl LedgerEntity for Ticket {
///     type Key = u64;
///     type Candidate = u64;
///     type Context = ();
///     type Error = TicketError;
///     fn admission_key(c: &u64) -> Option<u64> { Some(*c) }
///     fn from_candidate(seq: u64, _: u64, _: &()) -> Result<Self, TicketError> { Ok(Self { seq }) }
/// }
///
/// struct TicketClient { inner: LedgerClient<Ticket> }
///
/// impl LedgerReader<Ticket> for TicketClient {
///     type Error = TicketError;
///     fn inner(&self) -> &LedgerClient<Ticket> { &self.inner }
///     fn map_error(e: FrameworkError) -> TicketError { TicketError(e.to_string()) }
/// }
/// ```
#[async_trait]
pub trait LedgerReader<T: LedgerEntity>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic `LedgerClient`.
    fn inner(&self) -> &LedgerClient<T>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// All records, oldest first or newest first.
    #[tracing::instrument(skip(self))]
    async fn list_entries(&self, order: ListOrder) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(order).await.map_err(Self::map_error)
    }

    /// The record admitted under `key`, if any.
    #[tracing::instrument(skip(self))]
    async fn find(&self, key: T::Key) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(key).await.map_err(Self::map_error)
    }

    /// Counters of the underlying ledger.
    async fn stats(&self) -> Result<LedgerStats, Self::Error> {
        self.inner().stats().await.map_err(Self::map_error)
    }
}
