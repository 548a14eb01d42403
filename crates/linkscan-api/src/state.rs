//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! AppState holds only immutable configuration, the (optional) link
//! scanner, and the Prometheus metrics handle. No locks; nothing here is
//! mutated after startup except the metrics, which synchronize internally.

use std::sync::Arc;

use linkscan_core::ValidatorOptions;

use crate::middleware::metrics::ApiMetrics;
use crate::scanner::LinkScanner;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Options handed to the request validator.
    pub validator: ValidatorOptions,
    /// Mount `/metrics` and the metrics middleware.
    pub metrics_enabled: bool,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            validator: ValidatorOptions::default(),
            metrics_enabled: true,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `LINKSCAN_FORBID_UNKNOWN_FIELDS` (`true`/`1` enables; default off)
    /// - `LINKSCAN_METRICS_ENABLED` (default on; `false` disables)
    /// - `LINKSCAN_LOG_FORMAT` (`json`, otherwise text)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let forbid_unknown_fields = lookup("LINKSCAN_FORBID_UNKNOWN_FIELDS")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        // Anything other than "false" keeps metrics on.
        let metrics_enabled = lookup("LINKSCAN_METRICS_ENABLED")
            .map(|v| v.trim().to_lowercase() != "false")
            .unwrap_or(true);

        let log_format = match lookup("LINKSCAN_LOG_FORMAT") {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            port,
            validator: ValidatorOptions {
                forbid_unknown_fields,
            },
            metrics_enabled,
            log_format,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Scanning backend. `None` when `SCAN_SERVICE_URL` is not configured;
    /// the scan endpoint then answers 503 after validating the request.
    pub scanner: Option<Arc<dyn LinkScanner>>,
    pub metrics: ApiMetrics,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("scanner", &self.scanner.as_ref().map(|_| "configured"))
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// State with default configuration and no scanner.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// State with the given configuration and optional scanner.
    pub fn with_config(config: AppConfig, scanner: Option<Arc<dyn LinkScanner>>) -> Self {
        Self {
            config,
            scanner,
            metrics: ApiMetrics::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
