//! Contract tests for ScanServiceClient against a mocked scanning service.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/api/v1/scan-link` | `scan_link_*` |
//! | GET    | `/health` | `health_check_*` |

use linkscan_client::{ScanServiceClient, ScanServiceConfig, ScanServiceError};
use linkscan_core::LinkScanRequest;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zeroize::Zeroizing;

fn test_client(base_url: &str, token: Option<&str>) -> ScanServiceClient {
    let config = ScanServiceConfig {
        base_url: base_url.parse().unwrap(),
        api_token: token.map(|t| Zeroizing::new(t.to_string())),
        timeout_secs: 5,
    };
    ScanServiceClient::new(config).unwrap()
}

fn sample_request() -> LinkScanRequest {
    LinkScanRequest::try_from(&serde_json::json!({
        "assetCode": "XLM",
        "amount": 10,
        "memo": "Invoice-1",
        "recipientAddress": "GABC123"
    }))
    .unwrap()
}

// ── POST /api/v1/scan-link ───────────────────────────────────────────

#[tokio::test]
async fn scan_link_posts_camel_case_body_and_relays_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/scan-link"))
        .and(body_json(serde_json::json!({
            "assetCode": "XLM",
            "amount": 10,
            "memo": "Invoice-1",
            "recipientAddress": "GABC123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "riskLevel": "low",
            "alerts": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), None);
    let result = client.scan_link(&sample_request()).await.unwrap();

    assert_eq!(result["riskLevel"], "low");
    assert!(result["alerts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn scan_link_omits_absent_optionals() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/scan-link"))
        .and(body_json(serde_json::json!({"assetCode": "USDC", "amount": 100.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), None);
    let req =
        LinkScanRequest::try_from(&serde_json::json!({"assetCode": "USDC", "amount": 100.5}))
            .unwrap();
    let result = client.scan_link(&req).await.unwrap();
    assert_eq!(result["ok"], true);
}

#[tokio::test]
async fn scan_link_sends_bearer_token_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/scan-link"))
        .and(header("authorization", "Bearer scan-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), Some("scan-token"));
    client.scan_link(&sample_request()).await.unwrap();
}

#[tokio::test]
async fn scan_link_respects_base_path_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scanner/api/v1/scan-link"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/scanner", mock_server.uri()), None);
    client.scan_link(&sample_request()).await.unwrap();
}

#[tokio::test]
async fn scan_link_maps_non_2xx_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/scan-link"))
        .respond_with(ResponseTemplate::new(503).set_body_string("scanner overloaded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), None);
    let err = client.scan_link(&sample_request()).await.unwrap_err();

    match err {
        ScanServiceError::Api { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "scanner overloaded");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn scan_link_maps_invalid_json_to_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/scan-link"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), None);
    let err = client.scan_link(&sample_request()).await.unwrap_err();
    assert!(
        matches!(err, ScanServiceError::Deserialization { .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn scan_link_unreachable_service_is_http_error() {
    let client = test_client("http://127.0.0.1:1", None);
    let err = client.scan_link(&sample_request()).await.unwrap_err();
    assert!(matches!(err, ScanServiceError::Http { .. }), "got: {err:?}");
    assert_eq!(err.endpoint(), Some("POST /api/v1/scan-link"));
}

// ── GET /health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_check_reachable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), None);
    assert!(client.health_check().await.is_ok());
}

#[tokio::test]
async fn health_check_non_2xx_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri(), None);
    let err = client.health_check().await.unwrap_err();
    assert!(matches!(err, ScanServiceError::Api { status: 500, .. }));
}

#[tokio::test]
async fn health_check_unreachable() {
    let client = test_client("http://127.0.0.1:1", None);
    let err = client.health_check().await.unwrap_err();
    assert!(matches!(err, ScanServiceError::Http { .. }));
}
