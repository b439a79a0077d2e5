// src/logging.rs

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global fmt subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise `default_level` (e.g. "info",
/// "qs_pic=debug"). Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(true));

    // Already initialised elsewhere (e.g. a second binary entry point or tests).
    let _ = tracing::subscriber::set_global_default(subscriber);
}
