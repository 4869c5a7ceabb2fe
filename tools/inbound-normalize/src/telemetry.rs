use std::env;
use std::io;

use tracing_subscriber::layer::Layer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// JSON logs unless `LOG_FORMAT` asks for text.
pub fn json_logs_from_env() -> bool {
    env::var("LOG_FORMAT")
        .map(|v| !matches!(v.to_lowercase().as_str(), "text" | "pretty" | "plain"))
        .unwrap_or(true)
}

/// Installs the stderr subscriber filtered by `RUST_LOG` (default `info`).
/// Stdout is reserved for the normalized record.
pub fn init_tracing(json_logs: bool) {
    let fmt_layer = if json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .boxed()
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .ok();
}
