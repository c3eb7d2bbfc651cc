use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "log filter '{}' is not a valid EnvFilter directive", value)
            }
            TelemetryError::Subscriber(err) => write!(f, "failed to install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Builds the filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            }
        }),
    }
}

/// Installs the global fmt subscriber. Fails if one is already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_reports_the_offending_value() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = TelemetryConfig {
            log_level: "tracker=notalevel".to_string(),
        };
        let error = env_filter(&config).expect_err("invalid directive");
        assert!(error.to_string().contains("tracker=notalevel"));
    }

    #[test]
    fn plain_level_builds_filter() {
        let config = TelemetryConfig {
            log_level: "debug".to_string(),
        };
        assert!(env_filter(&config).is_ok());
    }
}
