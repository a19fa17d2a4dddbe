//! # LedgerEntity Trait
//!
//! The `LedgerEntity` trait is the contract a record type must satisfy to be kept in a
//! [`LedgerState`](crate::LedgerState) and served by a [`LedgerActor`](crate::LedgerActor).
//! It names the candidate payload the record is built from, the key used for duplicate
//! detection, and the context injected when a record is built.
//!
//! # Architecture Note
//! The ledger owns the *rules* (dedup, sequencing, append-only storage). The entity owns the
//! *shape* (how a candidate becomes a record, which field is the admission key). Writing the
//! rules once against this trait keeps them identical for every record type.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait that any record type must implement to be admitted into a ledger.
///
/// # Context
/// `Context` is handed to [`LedgerEntity::from_candidate`] on every admission. It is supplied
/// when the actor starts (`actor.run(context)`), so dependencies such as a clock can be
/// wired late, after the client handles have been distributed.
pub trait LedgerEntity: Clone + Send + Sync + 'static {
    /// Identifier used to detect duplicates (e.g. an externally supplied order number).
    type Key: Eq + Hash + Clone + Send + Sync + Debug;

    /// The untrusted payload a record is built from.
    type Candidate: Send + Sync + Debug;

    /// Runtime dependencies needed to build a record. Use `()` if none.
    type Context: Send + Sync;

    /// The error type for this record.
    ///
    /// A failure from [`LedgerEntity::from_candidate`] aborts the admission: nothing is
    /// appended and the sequence counter does not move.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the admission key from a candidate.
    ///
    /// `None` marks an unkeyed candidate; how those are treated is decided by the
    /// ledger's [`UnkeyedPolicy`](crate::UnkeyedPolicy).
    fn admission_key(candidate: &Self::Candidate) -> Option<Self::Key>;

    /// Builds the immutable record for an accepted candidate.
    ///
    /// `sequence` is the 1-based admission number this record will occupy.
    fn from_candidate(
        sequence: u64,
        candidate: Self::Candidate,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;
}
