use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::assessment::ScoringConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Reads `.env` (when present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = var("APP_ENV")
            .map(|raw| AppEnvironment::from_str(&raw))
            .unwrap_or(AppEnvironment::Development);

        let port = match var("APP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            None => 3000,
        };
        let server = ServerConfig {
            host: var("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
        };

        let telemetry = TelemetryConfig {
            log_level: var("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: var("APP_LOG_FORMAT")
                .map(|raw| LogFormat::from_str(&raw))
                .unwrap_or_default(),
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            scoring: load_scoring()?,
        })
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn load_scoring() -> Result<ScoringConfig, ConfigError> {
    let defaults = ScoringConfig::default();

    let attention_threshold = threshold("APP_RECOMMENDATION_THRESHOLD")?
        .unwrap_or(defaults.attention_threshold);
    let critical_threshold =
        threshold("APP_CRITICAL_THRESHOLD")?.unwrap_or(defaults.critical_threshold);
    if critical_threshold > attention_threshold {
        return Err(ConfigError::InvalidThreshold {
            variable: "APP_CRITICAL_THRESHOLD",
            value: critical_threshold.to_string(),
        });
    }

    let risk_cutoff = match var("APP_RISK_CUTOFF") {
        Some(raw) => raw
            .parse::<u8>()
            .ok()
            .filter(|cutoff| (1..=4).contains(cutoff))
            .ok_or(ConfigError::InvalidRiskCutoff)?,
        None => defaults.risk_cutoff,
    };

    Ok(ScoringConfig {
        attention_threshold,
        critical_threshold,
        risk_cutoff,
        ..defaults
    })
}

/// Scores live on the 1–5 scale; anything else is a typo.
fn threshold(variable: &'static str) -> Result<Option<f64>, ConfigError> {
    let Some(raw) = var(variable) else {
        return Ok(None);
    };
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && (1.0..=5.0).contains(value))
        .map(Some)
        .ok_or(ConfigError::InvalidThreshold {
            variable,
            value: raw,
        })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Output layout for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { variable: &'static str, value: String },
    InvalidRiskCutoff,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { variable, value } => write!(
                f,
                "{variable} must be a score between 1.0 and 5.0 (critical <= recommendation), got '{value}'"
            ),
            ConfigError::InvalidRiskCutoff => {
                write!(f, "APP_RISK_CUTOFF must be an integer between 1 and 4")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidThreshold { .. }
            | ConfigError::InvalidRiskCutoff => None,
        }
    }
}

/// Serializes tests that read or mutate process environment variables.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV: OnceLock<Mutex<()>> = OnceLock::new();
    ENV.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
