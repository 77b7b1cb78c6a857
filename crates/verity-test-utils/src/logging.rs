//! Tracing setup for tests.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_TEST_FILTER: &str = "verity_core=trace,verity_suite=debug";

/// Install a test-friendly subscriber.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
