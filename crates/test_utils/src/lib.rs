//! Test Utilities
//!
//! Shared fixtures, builders, property-test generators and assertion
//! helpers for the retail core test suite.

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Initialises tracing output for tests
///
/// Safe to call from every test; only the first call installs the
/// subscriber. Honors `RUST_LOG` for filtering.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
