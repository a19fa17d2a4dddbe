//! # Ledger Framework
//!
//! Building blocks for append-only, deduplicating record ledgers. A ledger accepts untrusted
//! *candidates*, rejects any whose admission key it has already seen, and stamps each
//! accepted record with the next number of a monotonically increasing sequence.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Entity Layer** ([`LedgerEntity`]) - the record type: how a candidate becomes a
//!    record and which field identifies duplicates.
//! 2. **State Layer** ([`LedgerState`]) - the synchronous rules: dedup, numbering,
//!    append-only storage, ordered listing.
//! 3. **Runtime Layer** ([`LedgerActor`]) - a Tokio task that owns one `LedgerState` and
//!    processes requests sequentially.
//! 4. **Interface Layer** ([`LedgerClient`], [`LedgerReader`]) - cloneable, type-safe
//!    handles for callers.
//!
//! ## Invariants
//!
//! - No two records share a key.
//! - The sequence counter equals the number of successful admissions. Rejections and failed
//!   builds never move it.
//! - Records are never removed or modified once appended.
//! - A listing in [`ListOrder::Insertion`] is exactly admission order;
//!   [`ListOrder::Reverse`] is its exact reverse.
//!
//! ## Choosing a Layer
//!
//! A single-threaded caller can own a [`LedgerState`] outright. As soon as more than one task
//! can admit, put the state behind a [`LedgerActor`]: its message loop is the one-writer-at-a-time
//! guard the invariants above depend on.
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted [`LedgerClient`] that needs no real records.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod tracing;

// Re-export core types for convenience
pub use actor::LedgerActor;
pub use client::LedgerClient;
pub use client_trait::LedgerReader;
pub use entity::LedgerEntity;
pub use error::FrameworkError;
pub use message::{LedgerRequest, Response};
pub use state::{
    Admission, LedgerState, LedgerStats, ListOrder, ParseListOrderError, ParseUnkeyedPolicyError,
    UnkeyedPolicy,
};
