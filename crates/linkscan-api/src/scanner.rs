//! # Link Scanner Seam
//!
//! The scan verdict is produced outside this service. Handlers talk to it
//! through [`LinkScanner`] so the HTTP layer can be exercised against a
//! stub, and so the production path goes through [`ScanServiceClient`].

use linkscan_client::{ScanServiceClient, ScanServiceError};
use linkscan_core::LinkScanRequest;

/// Backend that scans a validated payment-link request.
#[axum::async_trait]
pub trait LinkScanner: Send + Sync {
    /// Scan `request` and return the backend's verdict as opaque JSON.
    async fn scan(&self, request: &LinkScanRequest) -> Result<serde_json::Value, ScanServiceError>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> Result<(), ScanServiceError>;
}

#[axum::async_trait]
impl LinkScanner for ScanServiceClient {
    async fn scan(&self, request: &LinkScanRequest) -> Result<serde_json::Value, ScanServiceError> {
        self.scan_link(request).await
    }

    async fn health_check(&self) -> Result<(), ScanServiceError> {
        ScanServiceClient::health_check(self).await
    }
}
