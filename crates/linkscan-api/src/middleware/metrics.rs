//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Domain counters (validation failures by field and kind, scan
//! outcomes) are recorded by the scan handler.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use linkscan_core::ValidationFailures;
use prometheus::{
    core::Collector, Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

/// Path label for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Field label for keys outside the request schema.
const UNKNOWN_FIELD_LABEL: &str = "unknown";

/// Outcome of a scan attempt that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The scanner answered and its result was relayed.
    Relayed,
    /// The scanner failed or was unreachable.
    UpstreamError,
    /// No scanner is configured.
    Unavailable,
}

impl ScanOutcome {
    /// Label value used in `linkscan_scans_total`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relayed => "relayed",
            Self::UpstreamError => "upstream_error",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    // -- HTTP middleware metrics --
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    // -- Domain counters --
    validation_failures_total: IntCounterVec,
    scans_total: IntCounterVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("linkscan_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "linkscan_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new("linkscan_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let validation_failures_total = IntCounterVec::new(
            Opts::new(
                "linkscan_validation_failures_total",
                "Rejected scan-request constraints by field and failure kind",
            ),
            &["field", "kind"],
        )
        .expect("metric can be created");

        let scans_total = IntCounterVec::new(
            Opts::new(
                "linkscan_scans_total",
                "Validated scan requests by scanning outcome",
            ),
            &["outcome"],
        )
        .expect("metric can be created");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(validation_failures_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(scans_total.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                validation_failures_total,
                scans_total,
            }),
        }
    }

    /// Return current total request count (sum across all labels).
    pub fn requests(&self) -> u64 {
        sum_counter(&self.inner.http_requests_total)
    }

    /// Return current total error count (sum across all labels).
    pub fn errors(&self) -> u64 {
        sum_counter(&self.inner.http_errors_total)
    }

    /// Return the total number of recorded validation failures.
    pub fn validation_failures(&self) -> u64 {
        sum_counter(&self.inner.validation_failures_total)
    }

    /// Return the number of scans that ended with `outcome`.
    pub fn scans(&self, outcome: ScanOutcome) -> u64 {
        self.inner
            .scans_total
            .with_label_values(&[outcome.as_str()])
            .get()
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Count each failure of a rejected request under its field and kind.
    ///
    /// Keys outside the schema share one field label; client-chosen names
    /// never become label values.
    pub fn record_validation_failures(&self, failures: &ValidationFailures) {
        for failure in failures {
            let field = failure.field().map_or(UNKNOWN_FIELD_LABEL, |f| f.wire_name());
            self.inner
                .validation_failures_total
                .with_label_values(&[field, failure.kind()])
                .inc();
        }
    }

    /// Count one scan attempt.
    pub fn record_scan(&self, outcome: ScanOutcome) {
        self.inner
            .scans_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer).map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_counter(counter: &IntCounterVec) -> u64 {
    let mut total = 0u64;
    for mf in &counter.collect() {
        for m in mf.get_metric() {
            total += m.get_counter().get_value() as u64;
        }
    }
    total
}

/// Middleware that records HTTP request metrics via Prometheus.
///
/// Paths are labelled with the matched route template, never the raw URI,
/// so arbitrary 404 paths cannot blow up label cardinality.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        let status = response.status().as_u16();
        m.record_request(&method, &path, status, duration);
    }

    response
}
