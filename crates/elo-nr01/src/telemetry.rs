use crate::config::{LogFormat, TelemetryConfig};
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
                write!(f, "invalid log filter '{value}': unable to build EnvFilter")
            }
            TelemetryError::Subscriber(err) => write!(f, "subscriber already installed: {err}"),
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

/// `RUST_LOG` wins over the configured level so operators can widen logging per target.
pub(crate) fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::EnvFilter {
        value: config.log_level.clone(),
        source,
    })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    match config.format {
        LogFormat::Compact => builder
            .compact()
            .with_ansi(false)
            .try_init()
            .map_err(TelemetryError::Subscriber),
        LogFormat::Pretty => builder
            .pretty()
            .try_init()
            .map_err(TelemetryError::Subscriber),
    }
}
