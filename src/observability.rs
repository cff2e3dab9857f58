use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Initialize tracing and logging
///
/// `RUST_LOG` wins over the configured level when set. JSON output is meant
/// for log shippers, pretty output for a terminal.
pub fn init_observability(
    service_name: &str,
    service_version: &str,
    log_level: &str,
    log_format: LogFormat,
) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    match log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_filter(env_filter))
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init()?,
    }

    tracing::info!(
        service.name = service_name,
        service.version = service_version,
        "Observability initialized"
    );

    Ok(())
}
