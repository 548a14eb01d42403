//! Scanning-service client error types.

/// Errors from the scanning-service client.
#[derive(Debug, thiserror::Error)]
pub enum ScanServiceError {
    /// HTTP transport error (connection refused, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The scanning service returned a non-2xx status.
    #[error("scanning service {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body was not valid JSON.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ScanServiceError {
    /// The endpoint this error concerns, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Http { endpoint, .. }
            | Self::Api { endpoint, .. }
            | Self::Deserialization { endpoint, .. } => Some(endpoint),
            Self::Config(_) => None,
        }
    }
}
