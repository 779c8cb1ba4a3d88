//! Error types for the concordances HTTP service.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use config::ConfigError;

/// Rejections raised while checking an inbound request, before anything
/// reaches the orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Corrupted JSON")]
    CorruptedJson,

    #[error(
        "Concept UUID in payload is different from UUID path parameter (payload: \"{body_id}\", path: \"{path_id}\")"
    )]
    MismatchedConceptId { path_id: String, body_id: String },

    #[error("Payload has no concorded UUIDs to store.")]
    MissingConcordedIds,
}

/// Errors rendered to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Concordances not found")]
    NotFound,

    /// A dependency failed; `action` completes "Error ... concordances".
    #[error("Error {action} concordances")]
    ServiceUnavailable { action: &'static str },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn retrieving() -> Self {
        Self::ServiceUnavailable {
            action: "retrieving",
        }
    }

    pub fn storing() -> Self {
        Self::ServiceUnavailable { action: "storing" }
    }

    pub fn deleting() -> Self {
        Self::ServiceUnavailable { action: "deleting" }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(format!("Invalid payload. Error: {err}"))
    }
}

/// Error response body for HTTP endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Startup failures of the server binary.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Failed to bind to {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Metrics recorder could not be installed: {0}")]
    Telemetry(String),

    #[error("Server error: {0}")]
    Serve(String),
}
