//! Tracing subscriber configuration.
//!
//! Filtering follows `RUST_LOG` and falls back to `info`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the JSON subscriber.
///
/// Fails if a global subscriber is already set.
pub fn try_init() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported_but_init_stays_silent() {
        init_for_tests();
        assert!(try_init().is_err());
        crate::init();
    }
}
