//! Logging initialization.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::LoggingConfig;

/// Initializes the logging subsystem based on configuration.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let json_layer = fmt::layer().json().with_target(true);
            subscriber.with(json_layer).init();
        }
        _ => {
            // Alerts and notifications land in the log, so keep the human
            // format compact enough to read them as they fire.
            let pretty_layer = fmt::layer().compact().with_target(false);
            subscriber.with(pretty_layer).init();
        }
    }
}
