//! Order data structures: the extracted candidate and the admitted ledger entry.

pub mod candidate;
pub mod entry;

pub use candidate::*;
pub use entry::*;
