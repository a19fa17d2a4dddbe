//! Time source used to stamp admitted orders.
//!
//! Injected into the ledger actor as its run context, so tests can pin the admission time.

use chrono::{Local, NaiveDateTime, SubsecRound};
use std::sync::Arc;

pub trait Clock: Send + Sync {
    /// Current local time, truncated to whole seconds.
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0.trunc_subsecs(0)
    }
}

/// Shared handle passed to the ledger actor.
pub type SharedClock = Arc<dyn Clock>;
