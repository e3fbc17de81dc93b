use crate::logger::{Logger, LoggerConfig};
use crate::tracing_sink::TracingSink;
use std::sync::Arc;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Output settings for the subscriber installed by [`init_tracing`].
///
/// **Fields**
/// - `json`: render events as JSON lines instead of the human-readable
///   `fmt` format.
/// - `with_target`: include the event target (module path) in the output.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub json: bool,
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            json: false,
            with_target: true,
        }
    }
}

/// Install a global `tracing` subscriber that writes to stdout.
///
/// This is the usual pairing for [`TracingSink`]: contexts emit through the
/// sink, the subscriber formats and prints the resulting events.
///
/// **Returns**
/// - `Err(..)` if a global subscriber was already installed.
pub fn init_tracing_with_config(config: TracingConfig) -> Result<(), SetGlobalDefaultError> {
    // The JSON and plain `fmt` layers are different types, so the
    // subscriber is assembled once per variant.
    if config.json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(config.with_target);
        let subscriber = Registry::default().with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(config.with_target);
        let subscriber = Registry::default().with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)
    }
}

/// Initialize tracing with [`TracingConfig::default`].
pub fn init_tracing() -> Result<(), SetGlobalDefaultError> {
    init_tracing_with_config(TracingConfig::default())
}

/// Install the subscriber and return a [`Logger`] that emits through it.
///
/// Recommended entrypoint for typical services:
///
/// ```no_run
/// use request_log_context::init::{init_logger, TracingConfig};
/// use request_log_context::logger::LoggerConfig;
///
/// let logger = init_logger(LoggerConfig::default(), TracingConfig::default())
///     .expect("tracing already initialized");
/// ```
pub fn init_logger(config: LoggerConfig, tracing: TracingConfig) -> Result<Logger, SetGlobalDefaultError> {
    init_tracing_with_config(tracing)?;
    Ok(Logger::with_config(Arc::new(TracingSink), config))
}
