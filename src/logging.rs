use tracing_subscriber::{EnvFilter, fmt::time::*};

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` if set, else `level` is used for everything.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::rfc_3339())
        .init();
}
