//! Tracing subscriber setup
//!
//! The client only emits `tracing` events; installing a subscriber is left
//! to the application. These helpers cover the common cases.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,kinvey_infra=info,kinvey_core=info";

/// Output format for [`init_tracing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` overrides `default_filter`. Returns `false` if a global
/// subscriber was already installed.
pub fn init_tracing(default_filter: &str, format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(default_filter));

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.is_ok()
}

/// Subscriber for tests: writes through the test harness and never panics
/// when called more than once.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("debug"))
        .with_test_writer()
        .try_init();
}
