//! Tracing setup for the server binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,actix_web=info,actix_server=warn";

/// JSON lines unless `HEARTS_LOG_FORMAT=pretty`.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let pretty = std::env::var("HEARTS_LOG_FORMAT")
        .is_ok_and(|format| format.trim().eq_ignore_ascii_case("pretty"));

    let json_layer = (!pretty).then(|| {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_ansi(false)
            .json()
            .flatten_event(true)
    });
    let pretty_layer = pretty.then(|| fmt::layer().with_target(true).compact());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();

    tracing::info!(
        service = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "tracing initialised"
    );
}
