//! # Tracing Setup
//!
//! One-call initialization of structured logging for binaries built on the framework.
//!
//! ```bash
//! RUST_LOG=info cargo run     # admissions, rejections, shutdown
//! RUST_LOG=debug cargo run    # full candidate payloads
//! ```
//!
//! The ledger actor tags every event with `entity_type`, so module targets are hidden to
//! keep lines short.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info` when `RUST_LOG` is unset. Calling it twice is harmless; the second
/// call leaves the first subscriber in place.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
