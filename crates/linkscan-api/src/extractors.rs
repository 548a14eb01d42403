//! # Request Extraction & Validation
//!
//! Helpers that turn an Axum JSON extraction result into a validated
//! [`LinkScanRequest`], mapping each failure to the matching [`AppError`].

use axum::extract::rejection::JsonRejection;
use axum::Json;
use linkscan_core::{validate_with, JsonKind, LinkScanRequest, ValidatorOptions};
use serde_json::Value;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// Handlers take `Result<Json<T>, JsonRejection>` so that malformed bodies
/// produce this crate's error format instead of Axum's plain-text rejection:
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
///     // use req...
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a scan request body and run it through the validator.
///
/// A body that is valid JSON but not an object is a [`AppError::BadRequest`];
/// an object that breaks the field contract is an [`AppError::InvalidRequest`]
/// carrying every failure.
pub fn extract_scan_request(
    result: Result<Json<Value>, JsonRejection>,
    options: ValidatorOptions,
) -> Result<LinkScanRequest, AppError> {
    match extract_json(result)? {
        Value::Object(map) => validate_with(&map, options).map_err(AppError::InvalidRequest),
        other => Err(AppError::BadRequest(format!(
            "request body must be a JSON object, received {}",
            JsonKind::of(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_object_is_accepted() {
        let req = extract_scan_request(
            Ok(Json(json!({"assetCode": "USDC", "amount": 100.5}))),
            ValidatorOptions::default(),
        )
        .unwrap();
        assert_eq!(req.asset_code(), "USDC");
        assert!(req.memo().is_none());
    }

    #[test]
    fn non_object_is_bad_request() {
        let err = extract_scan_request(Ok(Json(json!([1, 2]))), ValidatorOptions::default())
            .unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("array"), "got: {msg}"),
            other => panic!("expected BadRequest, got: {other:?}"),
        }
    }

    #[test]
    fn contract_violation_is_invalid_request() {
        let err = extract_scan_request(Ok(Json(json!({"amount": 50}))), ValidatorOptions::default())
            .unwrap_err();
        match err {
            AppError::InvalidRequest(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures.as_slice()[0].kind(), "MISSING_FIELD");
            }
            other => panic!("expected InvalidRequest, got: {other:?}"),
        }
    }

    #[test]
    fn options_are_honoured() {
        let body = json!({"assetCode": "USDC", "amount": 1, "extra": true});
        assert!(extract_scan_request(Ok(Json(body.clone())), ValidatorOptions::default()).is_ok());
        let strict = ValidatorOptions {
            forbid_unknown_fields: true,
        };
        assert!(matches!(
            extract_scan_request(Ok(Json(body)), strict),
            Err(AppError::InvalidRequest(_))
        ));
    }
}
