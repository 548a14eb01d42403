//! # linkscan-client -- Typed Rust client for the scanning service
//!
//! The scam-detection logic for payment links runs in a separate service.
//! This crate is the only path by which validated [`LinkScanRequest`]s reach
//! it. Results are relayed as opaque JSON: the scan verdict format belongs to
//! the scanning service, not to this workspace.
//!
//! ## Endpoints
//!
//! | Method | Path               | Operation |
//! |--------|--------------------|-----------|
//! | POST   | `/api/v1/scan-link` | Scan a payment link |
//! | GET    | `/health`          | Liveness of the scanning service |

pub mod config;
pub mod error;
pub(crate) mod retry;

pub use config::{ConfigError, ScanServiceConfig};
pub use error::ScanServiceError;

use std::time::Duration;

use linkscan_core::LinkScanRequest;

/// Path of the scan endpoint, relative to the base URL.
const SCAN_LINK_PATH: &str = "api/v1/scan-link";

/// Path of the health endpoint, relative to the base URL.
const HEALTH_PATH: &str = "health";

/// Client for the scanning service.
#[derive(Debug, Clone)]
pub struct ScanServiceClient {
    http: reqwest::Client,
    config: ScanServiceConfig,
}

impl ScanServiceClient {
    /// Create a new client from configuration.
    pub fn new(config: ScanServiceConfig) -> Result<Self, ScanServiceError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            let mut value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|_| ScanServiceError::Config(ConfigError::InvalidToken))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ScanServiceError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ScanServiceConfig {
        &self.config
    }

    /// Submit a validated request for scanning and return the service's verdict.
    ///
    /// Calls `POST {base_url}/api/v1/scan-link` with the camelCase request body.
    pub async fn scan_link(
        &self,
        req: &LinkScanRequest,
    ) -> Result<serde_json::Value, ScanServiceError> {
        let endpoint = "POST /api/v1/scan-link";
        let url = self.config.endpoint(SCAN_LINK_PATH);

        let resp = retry::send_with_retry(retry::RetryPolicy::DEFAULT, endpoint, || {
            self.http.post(&url).json(req).send()
        })
        .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ScanServiceError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| ScanServiceError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Check that the scanning service answers its health endpoint.
    ///
    /// Calls `GET {base_url}/health` once, without retries; any 2xx is healthy.
    pub async fn health_check(&self) -> Result<(), ScanServiceError> {
        let endpoint = "GET /health";
        let url = self.config.endpoint(HEALTH_PATH);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ScanServiceError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(ScanServiceError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            })
        }
    }
}
