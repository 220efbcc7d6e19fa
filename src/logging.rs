//! Diagnostic log setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::EnvConfig;

/// Installs a stderr subscriber filtered by [`EnvConfig::log_directive`].
///
/// Returns false when a global subscriber was already installed. An invalid
/// directive falls back to `info`.
pub fn init(config: &EnvConfig) -> bool {
    let filter =
        EnvFilter::try_new(config.log_directive()).unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let installed = tracing_subscriber::registry()
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(directive = config.log_directive(), "logging initialized");
    }
    installed
}
