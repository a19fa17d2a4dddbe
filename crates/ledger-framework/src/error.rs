//! # Framework Errors
//!
//! Errors raised by the ledger plumbing itself, as opposed to the admission outcome.
//! A duplicate is not an error at this level; it is an [`Admission::Rejected`](crate::Admission).

/// Errors that can occur within the ledger framework.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Ledger actor closed")]
    ActorClosed,
    #[error("Ledger actor dropped response channel")]
    ActorDropped,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
