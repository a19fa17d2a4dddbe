//! Domain wrapper around the generic [`LedgerClient`](ledger_framework::LedgerClient).

pub mod order_ledger_client;

pub use order_ledger_client::*;
