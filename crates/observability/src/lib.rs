//! Process-wide tracing setup.
//!
//! The domain and store crates emit `tracing` events but never install a
//! subscriber; the embedding process calls [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Install an env-filtered JSON subscriber for the whole process.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Safe to call more
/// than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
