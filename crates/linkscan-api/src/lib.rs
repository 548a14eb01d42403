//! # linkscan-api: Axum API Service for Payment-Link Scanning
//!
//! Accepts "scan this payment link" requests, validates the submitted
//! payment details against the field contract in `linkscan-core`, and relays
//! valid requests to the external scanning service through
//! `linkscan-client`.
//!
//! ## API Surface
//!
//! | Route                          | Module                  | Purpose |
//! |--------------------------------|-------------------------|---------|
//! | `POST /v1/scam-alerts/scan-link` | [`routes::scan_link`] | Validate and scan |
//! | `GET /health/liveness`         | this module             | Liveness check |
//! | `GET /health/readiness`        | this module             | Readiness check |
//! | `GET /metrics`                 | this module             | Prometheus scrape |
//! | `GET /openapi.json`            | [`openapi`]             | OpenAPI document |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → BodyLimit → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod scanner;
pub mod state;

use axum::extract::{DefaultBodyLimit, Extension, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Maximum accepted request body size: 64 KiB.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Assemble the full application router with all routes and middleware.
///
/// `/metrics` and the metrics middleware are mounted only when
/// `config.metrics_enabled` is set. The fallback is installed before the
/// layers so unmatched requests pass through them too.
pub fn app(state: AppState) -> Router {
    let metrics_on = state.config.metrics_enabled;

    let mut api = Router::new()
        .merge(routes::scan_link::router())
        .merge(openapi::router())
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        api = api.route("/metrics", axum::routing::get(prometheus_metrics));
    }

    let mut api = api
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(state.metrics.clone()));
    }

    api.layer(middleware::tracing_layer::layer())
        .with_state(state)
}

/// GET /metrics: Prometheus metrics scrape endpoint.
async fn prometheus_metrics(Extension(metrics): Extension<ApiMetrics>) -> Response {
    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness check: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check: verifies the application is ready to serve traffic.
///
/// Without a scanner the check passes: the service may intentionally run
/// validation-only, and the scan endpoint already answers 503. With a
/// scanner configured, its health endpoint must answer.
async fn readiness(State(state): State<AppState>) -> Response {
    if let Some(scanner) = &state.scanner {
        if let Err(e) = scanner.health_check().await {
            tracing::warn!(error = %e, "scanning service health check failed");
            return (StatusCode::SERVICE_UNAVAILABLE, "scanning service unreachable")
                .into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}

/// Fallback for unmatched routes.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
