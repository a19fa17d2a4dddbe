//! # Order Ledger
//!
//! The session's append-only record of admitted orders, built on
//! [`ledger_framework`].
//!
//! ## Structure
//!
//! - [`entity`] - [`LedgerEntity`](ledger_framework::LedgerEntity) implementation for
//!   [`OrderEntry`]: `order_id` is the admission key, the ledger sequence becomes the
//!   `ITN-` tracking number.
//! - [`error`] - [`OrderError`], separating duplicates from an unreachable ledger.
//! - [`new()`] - factory for the actor and its client.
//!
//! ## Unidentified Orders
//!
//! A candidate without an `order_id` is governed by [`UnkeyedPolicy`]. With the default,
//! `SingleSlot`, a missing id counts as a value: the first unidentified order is admitted
//! and every later one is rejected as its duplicate. `AlwaysAdmit` records them all.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::OrderEntry;
use ledger_framework::{LedgerActor, LedgerClient, UnkeyedPolicy};

/// Default request channel capacity for the order ledger.
pub const DEFAULT_BUFFER: usize = 32;

/// Creates a new order ledger actor and its client.
pub fn new(
    buffer_size: usize,
    policy: UnkeyedPolicy,
) -> (LedgerActor<OrderEntry>, LedgerClient<OrderEntry>) {
    LedgerActor::new(buffer_size, policy)
}
