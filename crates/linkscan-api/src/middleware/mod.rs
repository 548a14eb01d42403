//! # HTTP Middleware
//!
//! Tower layers applied to the API router: per-request tracing spans and
//! Prometheus request metrics.

pub mod metrics;
pub mod tracing_layer;
