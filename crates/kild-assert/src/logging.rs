//! Test-friendly `tracing` setup.
//!
//! Assertion failures and context outcomes are emitted as structured events
//! (`event = "assert.*"`). Nothing is printed unless a subscriber is
//! installed; [`init_test_logging`] installs one whose output is captured
//! by the test harness like `println!`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a global subscriber for tests.
///
/// Honors `RUST_LOG`. Safe to call from every test: only the first call
/// installs anything, later calls return `false`.
pub fn init_test_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = fmt::layer()
        .with_test_writer()
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_logging_is_idempotent() {
        init_test_logging();
        assert!(!init_test_logging());
    }
}
