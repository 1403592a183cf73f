// telemetry.rs - Logging setup
//
// Filtering follows RUST_LOG, e.g. RUST_LOG=table_fixtures=debug shows every
// fixture statement. Output goes through the test writer so it is captured
// per test.

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. Safe to call from every test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_test_writer()
        .try_init();
}
