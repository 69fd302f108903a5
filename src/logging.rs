//! Log setup for the command-line tool
//!
//! Events go to stderr so rendered output on stdout stays clean for pipes.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` wins over the configured level.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(config: &LoggingConfig) {
    let subscriber = tracing_subscriber::registry().with(build_filter(&config.level));

    let result = if config.json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).try_init()
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("subscriber already installed");
    }
}
