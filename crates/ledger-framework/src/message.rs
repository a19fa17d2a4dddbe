//! # Ledger Messages
//!
//! Request types sent from a [`LedgerClient`](crate::LedgerClient) to a
//! [`LedgerActor`](crate::LedgerActor). Each request carries a oneshot sender the actor
//! uses to answer.

use crate::entity::LedgerEntity;
use crate::error::FrameworkError;
use crate::state::{Admission, LedgerStats, ListOrder};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// There is exactly one mutating request, `Admit`. Everything else reads. There is no
/// update or delete: a ledger is append-only.
#[derive(Debug)]
pub enum LedgerRequest<T: LedgerEntity> {
    Admit {
        candidate: T::Candidate,
        respond_to: Response<Admission<T>>,
    },
    List {
        order: ListOrder,
        respond_to: Response<Vec<T>>,
    },
    Find {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    Stats {
        respond_to: Response<LedgerStats>,
    },
}
