//! Logging setup for the runner binary.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Installs a console subscriber writing to stderr, filtered by `RUST_LOG`
/// (default `info`). Later calls are no-ops.
pub fn init_telemetry(service_name: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init();

        if installed.is_ok() {
            tracing::debug!(service.name = service_name, "Telemetry initialized");
        }
    });
}
