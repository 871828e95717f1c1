//! Logging system for uxkit.
//!
//! Installs a `tracing` subscriber whose filter honours `RUST_LOG` and
//! otherwise falls back to the configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uxkit_types::{LogLevel, Result, ToolkitError};

/// Initialize logging at the given level.
///
/// Fails if a global subscriber has already been installed.
pub fn init(level: LogLevel) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| ToolkitError::Config(format!("Failed to initialize logging: {}", e)))
}

/// Build the filter used by [`init`].
pub fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}
