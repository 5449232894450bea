//! Tracing setup shared by the binaries.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a stderr subscriber. `RUST_LOG` wins over `default_directive`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
