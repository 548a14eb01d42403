//! # linkscan-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the payment-link scan API.
//! Binds to configurable port (default 8080).

use std::sync::Arc;

use linkscan_api::scanner::LinkScanner;
use linkscan_api::state::{AppConfig, AppState, LogFormat};
use linkscan_client::{ConfigError, ScanServiceClient, ScanServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();

    // Initialize structured tracing.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    // Attempt to create the scanning-service client from environment.
    let scanner: Option<Arc<dyn LinkScanner>> = match ScanServiceConfig::from_env() {
        Ok(scan_config) => {
            tracing::info!(base_url = %scan_config.base_url, "scanning service configured");
            match ScanServiceClient::new(scan_config) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    tracing::error!("Failed to create scanning service client: {e}");
                    return Err(e.into());
                }
            }
        }
        Err(ConfigError::MissingUrl) => {
            tracing::warn!(
                "Scanning service not configured. Scan requests will be validated and answered with 503."
            );
            None
        }
        Err(e) => {
            tracing::error!("Invalid scanning service configuration: {e}");
            return Err(e.into());
        }
    };

    tracing::info!(
        forbid_unknown_fields = config.validator.forbid_unknown_fields,
        metrics_enabled = config.metrics_enabled,
        "configuration loaded"
    );

    let port = config.port;
    let app = linkscan_api::app(AppState::with_config(config, scanner));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("LinkScan API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
