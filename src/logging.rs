//! Tracing setup for test binaries.

use tracing_subscriber::EnvFilter;

/// Filter directives for [`init_test_tracing`], e.g. `SNOOP_LOG=snoop=debug`.
pub const LOG_ENV: &str = "SNOOP_LOG";

/// Install a fmt subscriber that writes through the test harness.
///
/// Defaults to `warn` when `SNOOP_LOG` is unset or invalid. Safe to call from
/// every test; only the first call installs anything.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_ansi(false)
        .try_init();
}
