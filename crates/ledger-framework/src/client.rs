//! # Ledger Client
//!
//! The handle used to talk to a running [`LedgerActor`](crate::LedgerActor).

use crate::entity::LedgerEntity;
use crate::error::FrameworkError;
use crate::message::LedgerRequest;
use crate::state::{Admission, LedgerStats, ListOrder};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `LedgerActor`.
///
/// Holds only the sender half of the actor's channel, so cloning is cheap and clones can be
/// handed to as many tasks as needed. Requests from all clones are processed one at a time,
/// in arrival order.
pub struct LedgerClient<T: LedgerEntity> {
    sender: mpsc::Sender<LedgerRequest<T>>,
}

impl<T: LedgerEntity> Clone for LedgerClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: LedgerEntity> LedgerClient<T> {
    pub fn new(sender: mpsc::Sender<LedgerRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn admit(&self, candidate: T::Candidate) -> Result<Admission<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Admit {
                candidate,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self, order: ListOrder) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::List { order, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn find(&self, key: T::Key) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Find { key, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn stats(&self) -> Result<LedgerStats, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Stats { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
