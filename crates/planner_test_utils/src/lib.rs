//! # Planner Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Sample world data and village fixtures
//! - Determinism test harness
//! - Property-based testing strategies
//! - Test log capture

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;

/// Route `tracing` output through the test harness's captured writer.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
