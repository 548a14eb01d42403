//! # Payment-Link Scan Endpoint
//!
//! `POST /v1/scam-alerts/scan-link` validates the submitted payment-link
//! details and, when they satisfy the field contract, hands the typed
//! request to the configured [`LinkScanner`](crate::scanner::LinkScanner).
//! The scanner's verdict is relayed unchanged inside a response envelope
//! that identifies the scan.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use linkscan_core::LinkScanRequest;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::extract_scan_request;
use crate::middleware::metrics::ScanOutcome;
use crate::state::AppState;

/// Route path of the scan endpoint.
pub const SCAN_LINK_ROUTE: &str = "/v1/scam-alerts/scan-link";

/// Documented shape of a scan request body.
///
/// The handler validates the raw JSON object itself so that every violated
/// constraint is reported at once; this type exists for the OpenAPI schema.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ScanLinkPayload {
    /// Asset identifier. Must be a non-empty string.
    #[schema(example = "USDC")]
    pub asset_code: String,
    /// Payment amount. Must be a number not less than 0.
    #[schema(example = 100.5, minimum = 0)]
    pub amount: f64,
    /// Free-text memo attached to the payment.
    #[schema(example = "Invoice-12345")]
    pub memo: Option<String>,
    /// Destination account identifier.
    #[schema(example = "GABC123")]
    pub recipient_address: Option<String>,
}

/// Envelope returned for a completed scan.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanLinkResponse {
    /// Identifier assigned to this scan.
    pub scan_id: Uuid,
    /// When the scanner's verdict was received.
    pub scanned_at: DateTime<Utc>,
    /// The validated request, as forwarded to the scanner.
    #[schema(value_type = ScanLinkPayload)]
    pub request: LinkScanRequest,
    /// The scanner's verdict, relayed unchanged.
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
}

/// Build the scan router.
pub fn router() -> Router<AppState> {
    Router::new().route(SCAN_LINK_ROUTE, post(scan_link))
}

/// POST /v1/scam-alerts/scan-link: Validate and scan a payment link.
#[utoipa::path(
    post,
    path = "/v1/scam-alerts/scan-link",
    request_body = ScanLinkPayload,
    responses(
        (status = 200, description = "Scan completed", body = ScanLinkResponse),
        (status = 400, description = "Malformed body or field contract violated", body = crate::error::ErrorBody),
        (status = 502, description = "Scanning service failed", body = crate::error::ErrorBody),
        (status = 503, description = "Scanning service not configured", body = crate::error::ErrorBody),
    ),
    tag = "scam-alerts"
)]
pub async fn scan_link(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ScanLinkResponse>, AppError> {
    let request = extract_scan_request(body, state.config.validator).map_err(|err| {
        if let AppError::InvalidRequest(failures) = &err {
            state.metrics.record_validation_failures(failures);
        }
        err
    })?;

    let Some(scanner) = state.scanner.as_ref() else {
        state.metrics.record_scan(ScanOutcome::Unavailable);
        return Err(AppError::service_unavailable(
            "scanning service is not configured",
        ));
    };

    let result = scanner.scan(&request).await.map_err(|e| {
        state.metrics.record_scan(ScanOutcome::UpstreamError);
        AppError::upstream(e.to_string())
    })?;
    state.metrics.record_scan(ScanOutcome::Relayed);

    let scan_id = Uuid::new_v4();
    tracing::info!(%scan_id, asset_code = request.asset_code(), "payment link scanned");

    Ok(Json(ScanLinkResponse {
        scan_id,
        scanned_at: Utc::now(),
        request,
        result,
    }))
}
