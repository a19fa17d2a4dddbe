//! # Order Intake
//!
//! Turns free-form order emails into structured order records and keeps them in a
//! deduplicating session ledger.
//!
//! ## Pipeline
//!
//! 1. **Extraction** ([`extraction`]) - the email body goes to a text-generation model
//!    together with a fixed JSON schema; the answer is parsed into an
//!    [`OrderCandidate`](model::OrderCandidate).
//! 2. **Admission** ([`ledger`], [`clients`]) - the candidate is offered to the order ledger.
//!    A new `order_id` becomes an [`OrderEntry`](model::OrderEntry) with the next
//!    `ITN-0000001`-style tracking number and the admission time; a known one is rejected.
//! 3. **Reporting** ([`report`]) - notification, duplicate notice, item and history tables.
//!
//! The ledger itself is a [`ledger_framework::LedgerActor`]: one Tokio task owns the records
//! and handles requests one at a time, so concurrent submissions of the same order admit it
//! exactly once.
//!
//! ## Module Tour
//!
//! - [`lifecycle`] - [`IntakeSystem`](lifecycle::IntakeSystem) starts the ledger, wires the
//!   clock in and runs the submit path.
//! - [`config`] - environment-driven [`IntakeConfig`](config::IntakeConfig).
//! - [`clock`] - injectable time source for admission timestamps.
//! - [`error`] - [`IntakeError`](error::IntakeError), one variant per failing stage.
//!
//! ## Running
//!
//! ```bash
//! GEMINI_API_KEY=... RUST_LOG=info cargo run -- order.eml
//! ```

pub mod clients;
pub mod clock;
pub mod config;
pub mod error;
pub mod extraction;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod report;
