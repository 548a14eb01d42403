//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LinkScan API",
        version = "0.1.0",
        description = "Validation and relay of payment-link scan requests to the scam-detection service.",
        license(name = "BUSL-1.1")
    ),
    paths(crate::routes::scan_link::scan_link),
    components(schemas(
        crate::routes::scan_link::ScanLinkPayload,
        crate::routes::scan_link::ScanLinkResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::error::FieldViolation,
    )),
    tags(
        (name = "scam-alerts", description = "Payment-link scam scanning"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
