//! Startup, wiring and shutdown of the intake pipeline.

pub mod intake_system;

pub use intake_system::*;
