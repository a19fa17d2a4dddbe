//! # Ledger Actor
//!
//! This module defines the `LedgerActor`, the server half of the framework. It owns a
//! [`LedgerState`] and processes requests one at a time, which is what makes the duplicate
//! check and the append a single indivisible step from every client's point of view.

use crate::client::LedgerClient;
use crate::entity::LedgerEntity;
use crate::error::FrameworkError;
use crate::message::LedgerRequest;
use crate::state::{Admission, LedgerState, UnkeyedPolicy};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns a ledger.
///
/// # Concurrency Model
/// The actor is the only owner of its `LedgerState`. Clients never touch the state; they
/// send a [`LedgerRequest`] and await the answer. Because the loop handles one message at a
/// time, two admissions can never interleave and no `Mutex` is needed.
///
/// # Usage Pattern
///
/// 1.  **Create**: `LedgerActor::new()` returns the actor and a client.
/// 2.  **Wire & Run**: spawn `actor.run(context)`; the context is handed to every
///     [`LedgerEntity::from_candidate`] call.
/// 3.  **Use**: clone the client wherever admissions or reads are needed.
///
/// ```rust
/// use ledger_framework::{Admission, LedgerActor, LedgerEntity, UnkeyedPolicy};
///
/// #[derive(Clone, Debug)]
/// struct Receipt { seq: u64, reference: String }
/// #[derive(Debug, thiserror::Error)] #[error("never")] struct Never;
///
/// impl LedgerEntity for Receipt {
///     type Key = String;
///     type Candidate = String;
///     type Context = ();
///     type Error = Never;
///     fn admission_key(reference: &String) -> Option<String> { Some(reference.clone()) }
///     fn from_candidate(seq: u64, reference: String, _: &()) -> Result<Self, Never> {
///         Ok(Self { seq, reference })
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = LedgerActor::<Receipt>::new(10, UnkeyedPolicy::SingleSlot);
///     tokio::spawn(actor.run(()));
///
///     let first = client.admit("R-1".to_string()).await.unwrap();
///     assert_eq!(first.admitted().unwrap().seq, 1);
///
///     let again = client.admit("R-1".to_string()).await.unwrap();
///     assert!(matches!(again, Admission::Rejected { .. }));
/// }
/// ```
pub struct LedgerActor<T: LedgerEntity> {
    receiver: mpsc::Receiver<LedgerRequest<T>>,
    state: LedgerState<T>,
}

impl<T: LedgerEntity> LedgerActor<T> {
    /// Creates a new `LedgerActor` and its associated `LedgerClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. When it is full, client calls
    ///   wait for space.
    /// * `policy` - How candidates without an admission key are treated.
    pub fn new(buffer_size: usize, policy: UnkeyedPolicy) -> (Self, LedgerClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: LedgerState::new(policy),
        };
        (actor, LedgerClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let policy = self.state.policy();
        info!(entity_type, %policy, "Ledger started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::Admit {
                    candidate,
                    respond_to,
                } => {
                    debug!(entity_type, ?candidate, "Admit");
                    let result = match self.state.admit(candidate, &context) {
                        Ok(Admission::Admitted(entry)) => {
                            info!(
                                entity_type,
                                sequence = self.state.counter(),
                                size = self.state.len(),
                                "Admitted"
                            );
                            Ok(Admission::Admitted(entry))
                        }
                        Ok(Admission::Rejected { key: Some(key) }) => {
                            warn!(entity_type, ?key, "Duplicate rejected");
                            Ok(Admission::Rejected { key: Some(key) })
                        }
                        Ok(Admission::Rejected { key: None }) => {
                            warn!(
                                entity_type,
                                %policy,
                                "Unkeyed candidate rejected: an unkeyed entry already exists"
                            );
                            Ok(Admission::Rejected { key: None })
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Admit failed");
                            Err(FrameworkError::EntityError(Box::new(e)))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                LedgerRequest::List { order, respond_to } => {
                    debug!(entity_type, ?order, size = self.state.len(), "List");
                    let _ = respond_to.send(Ok(self.state.list(order)));
                }
                LedgerRequest::Find { key, respond_to } => {
                    let item = self.state.find(&key).cloned();
                    debug!(entity_type, ?key, found = item.is_some(), "Find");
                    let _ = respond_to.send(Ok(item));
                }
                LedgerRequest::Stats { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.stats()));
                }
            }
        }

        let stats = self.state.stats();
        info!(
            entity_type,
            size = stats.entries,
            admitted = stats.admitted,
            rejected = stats.rejected,
            "Shutdown"
        );
    }
}
