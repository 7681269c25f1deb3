use std::str::FromStr;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::LogFormat;

/// Installs the global subscriber. A second call only logs a warning.
pub fn init_logging(filter: &str, format: LogFormat) -> Result<(), anyhow::Error> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_str(filter)?)
        .with_target(true)
        .with_writer(std::io::stdout);

    let installed = match format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Text => subscriber.try_init(),
    };

    if let Err(err) = installed {
        warn!("logging already initialized, keeping the existing subscriber: {err}");
    }

    Ok(())
}
