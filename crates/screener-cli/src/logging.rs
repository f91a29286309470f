//! Logging setup on top of `tracing-subscriber`.
//!
//! Output goes to stderr so stdout stays machine-readable.
//! - **pretty**: multi-line, for development
//! - **compact**: one line per event
//! - **json**: one JSON object per event, for log aggregation

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `screener_core=debug`.
    pub level: String,
    pub format: LogFormat,
    pub with_target: bool,
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
            with_target: true,
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// `RUST_LOG` wins over the configured level.
    fn env_filter(&self) -> Result<EnvFilter, CliError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|error| CliError::Logging(error.to_string()))
    }
}

pub fn init_logging(config: LogConfig) -> Result<(), CliError> {
    let env_filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(config.with_target),
            )
            .try_init(),
    };
    installed.map_err(|error| CliError::Logging(error.to_string()))?;

    tracing::debug!(format = ?config.format, level = %config.level, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        let config = LogConfig::new("screener_core=verbose");
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(config.env_filter().is_err());
        }
    }

    #[test]
    fn compact_is_default_format() {
        assert_eq!(LogConfig::new("info").format, LogFormat::Compact);
    }
}
