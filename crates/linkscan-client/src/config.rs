//! Scanning-service client configuration.
//!
//! The service base URL is required; the bearer token is optional because
//! in-cluster deployments commonly run the scanner without authentication.

use url::Url;
use zeroize::Zeroizing;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the scanning service.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ScanServiceConfig {
    /// Base URL of the scanning service (e.g. `http://scanner.internal:9000`).
    pub base_url: Url,
    /// Bearer token sent on every request, if set.
    pub api_token: Option<Zeroizing<String>>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ScanServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanServiceConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ScanServiceConfig {
    /// Configuration with the given base URL, no token, and the default timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SCAN_SERVICE_URL` (required)
    /// - `SCAN_SERVICE_TOKEN` (optional)
    /// - `SCAN_SERVICE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("SCAN_SERVICE_URL").map_err(|_| ConfigError::MissingUrl)?;
        Self::from_parts(
            &raw,
            std::env::var("SCAN_SERVICE_TOKEN").ok(),
            std::env::var("SCAN_SERVICE_TIMEOUT_SECS").ok().as_deref(),
        )
    }

    fn from_parts(
        raw_url: &str,
        token: Option<String>,
        timeout: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let base_url = Url::parse(raw_url)
            .map_err(|e| ConfigError::InvalidUrl("SCAN_SERVICE_URL".to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            api_token: token.filter(|t| !t.is_empty()).map(Zeroizing::new),
            timeout_secs: timeout
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Build an endpoint URL by appending `path` to the base URL.
    ///
    /// Any path prefix in the base URL is preserved
    /// (`http://h/scanner` + `api/v1/scan-link` → `http://h/scanner/api/v1/scan-link`).
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/{}", path.trim_start_matches('/'))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SCAN_SERVICE_URL environment variable is required")]
    MissingUrl,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("SCAN_SERVICE_TOKEN is not a valid HTTP header value")]
    InvalidToken,
}
