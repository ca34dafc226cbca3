//! Tracing/logging setup shared by binaries and tests.

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let _ = tracing::try_init();
}

/// Logging for test runs: human-readable output captured per test.
///
/// Safe to call from every test.
pub fn init_for_tests() {
    tracing::init_for_tests();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
