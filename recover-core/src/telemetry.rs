//! Telemetry initialization

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize structured logging for a Recover service.
///
/// Installs a `tracing` subscriber with an `EnvFilter` (overridable via
/// `RUST_LOG`, default `info`) and console output. Safe to call more than
/// once; only the first call installs the subscriber.
///
/// # Example
/// ```
/// use recover_core::init_telemetry;
/// init_telemetry("recover-server").expect("Failed to initialize telemetry");
/// ```
pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .expect("Failed to create env filter");

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();

        tracing::info!(service.name = service_name, "Telemetry initialized");
    });

    Ok(())
}
