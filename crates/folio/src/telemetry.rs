use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,folio=debug,folio_composer=debug,folio_core=debug";

/// Initialize console logging.
///
/// The filter is read from `RUST_LOG` and falls back to debug output for the
/// folio crates and info for everything else.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_console_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Console telemetry initialized");
    Ok(())
}

/// Initialize JSON logging, one event per line.
///
/// Useful when the composer runs inside a host that ships logs to a collector.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_json_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()?;

    info!("JSON telemetry initialized");
    Ok(())
}
