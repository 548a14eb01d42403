//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps request-parsing failures, validation failures, and scanning-service
//! errors to HTTP status codes with JSON error bodies.
//! Never exposes upstream error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkscan_core::{ValidationFailure, ValidationFailures};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API surface.
/// The `details` field carries the per-field violations of a rejected request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// One violated field constraint, as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Wire name of the field (`$` for the payload as a whole).
    pub field: String,
    /// Failure kind: MISSING_FIELD, WRONG_TYPE, EMPTY, OUT_OF_RANGE, UNKNOWN_FIELD.
    pub kind: String,
    /// Declared kind of the field ("string" or "number").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Inclusive lower bound, for range failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// The offending value; absent when the field was missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Human-readable reason.
    pub reason: String,
}

impl From<&ValidationFailure> for FieldViolation {
    fn from(failure: &ValidationFailure) -> Self {
        Self {
            field: failure.field_name().to_string(),
            kind: failure.kind().to_string(),
            expected: failure.expected().map(|k| k.as_str().to_string()),
            min: match failure {
                ValidationFailure::OutOfRange { min, .. } => Some(*min),
                _ => None,
            },
            value: failure.value(),
            reason: failure.to_string(),
        }
    }
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// No route matches the request (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body could not be parsed as a JSON object (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body parsed but violates the field contract (400).
    #[error("validation error: {0}")]
    InvalidRequest(ValidationFailures),

    /// The scanning service returned an error or is unreachable (502).
    #[error("upstream scanning service error: {0}")]
    UpstreamError(String),

    /// Service dependency not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::UpstreamError(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }

    /// Construct an upstream error (502 Bad Gateway).
    pub fn upstream(msg: String) -> Self {
        Self::UpstreamError(msg)
    }

    /// Construct a service unavailable error (503).
    pub fn service_unavailable(msg: &str) -> Self {
        Self::ServiceUnavailable(msg.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose upstream error messages to clients.
        let message = match &self {
            Self::UpstreamError(_) => "An upstream service error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::UpstreamError(_) => tracing::error!(error = %self, "upstream scanning service error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            Self::InvalidRequest(failures) => {
                tracing::debug!(failures = failures.len(), "scan request rejected")
            }
            _ => {}
        }

        let details = match &self {
            Self::InvalidRequest(failures) => {
                let violations: Vec<FieldViolation> = failures.iter().map(FieldViolation::from).collect();
                serde_json::to_value(violations).ok()
            }
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationFailures> for AppError {
    fn from(failures: ValidationFailures) -> Self {
        Self::InvalidRequest(failures)
    }
}
