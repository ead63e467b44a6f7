//! Process-wide `tracing` subscriber.

use anyhow::{Result, anyhow};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Build the filter: `RUST_LOG` when set, else `config.level`.
///
/// # Errors
///
/// Fails when the configured level is not a valid filter directive.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.level)
            .map_err(|e| anyhow!("invalid log level '{}': {e}", config.level))
    })
}

/// Install the global subscriber (text or JSON lines on stdout).
///
/// # Errors
///
/// Fails on an invalid filter or when a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let layer = match config.format {
        LogFormat::Text => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn configured_level_is_used_without_rust_log() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let filter = env_filter(&LoggingConfig::default()).map_err(|e| e.to_string())?;
            assert_eq!(filter.to_string(), "info");
            Ok(())
        });
    }

    #[test]
    fn invalid_level_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let config = LoggingConfig {
                level: "info,petfinder=verbose".to_owned(),
                format: LogFormat::Text,
            };
            assert!(env_filter(&config).is_err());
            Ok(())
        });
    }
}
