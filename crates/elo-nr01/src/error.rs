use crate::assessment::router::status_for;
use crate::assessment::AssessmentServiceError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Assessment(AssessmentServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Serialization(err) => write!(f, "serialization error: {err}"),
            AppError::Assessment(err) => write!(f, "assessment error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Serialization(err) => Some(err),
            AppError::Assessment(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Assessment(err) => status_for(err),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<AssessmentServiceError> for AppError {
    fn from(value: AssessmentServiceError) -> Self {
        Self::Assessment(value)
    }
}
