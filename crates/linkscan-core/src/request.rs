//! # Scan Request Value Object
//!
//! [`LinkScanRequest`] is the validated snapshot of one inbound "scan a
//! payment link" request. Fields are private and only the validator in
//! [`crate::validate`] constructs it, so every instance satisfies the field
//! contract.
//!
//! ## Amount precision
//!
//! [`Amount`] keeps the JSON number exactly as it was parsed. Integer amounts
//! stay exact up to the `u64`/`i64` range and decimal amounts are carried as
//! received, so this layer never introduces rounding of its own. Consumers
//! that need fixed-point arithmetic should convert from [`Amount::as_number`].

use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::{ValidationFailure, ValidationFailures};
use crate::field::JsonKind;

/// A non-negative amount, as received on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Amount(Number);

impl Amount {
    pub(crate) fn new(number: Number) -> Self {
        Self(number)
    }

    /// The underlying JSON number.
    pub fn as_number(&self) -> &Number {
        &self.0
    }

    /// The amount as a float. Large integers may lose precision.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }

    /// The amount as an integer, when it was sent as one.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.as_u64()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated "scan a payment link" request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkScanRequest {
    asset_code: String,
    amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient_address: Option<String>,
}

impl LinkScanRequest {
    pub(crate) fn new(
        asset_code: String,
        amount: Amount,
        memo: Option<String>,
        recipient_address: Option<String>,
    ) -> Self {
        Self {
            asset_code,
            amount,
            memo,
            recipient_address,
        }
    }

    /// Asset code to be transferred (e.g. `"USDC"`).
    pub fn asset_code(&self) -> &str {
        &self.asset_code
    }

    /// Amount to be transferred.
    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    /// Memo or payment reference, if one was provided.
    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    /// Recipient address for additional verification, if one was provided.
    pub fn recipient_address(&self) -> Option<&str> {
        self.recipient_address.as_deref()
    }
}

/// Validate an arbitrary JSON value with default options.
///
/// Non-object values fail with a single [`ValidationFailure::NotAnObject`].
impl TryFrom<&Value> for LinkScanRequest {
    type Error = ValidationFailures;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => crate::validate::validate(map),
            other => Err(ValidationFailures(vec![ValidationFailure::NotAnObject {
                received: JsonKind::of(other),
            }])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(memo: Option<&str>, recipient: Option<&str>) -> LinkScanRequest {
        LinkScanRequest::new(
            "USDC".to_string(),
            Amount::new(Number::from_f64(100.5).unwrap()),
            memo.map(str::to_string),
            recipient.map(str::to_string),
        )
    }

    #[test]
    fn serializes_camel_case_and_omits_absent_optionals() {
        let value = serde_json::to_value(request(None, None)).unwrap();
        assert_eq!(value, json!({"assetCode": "USDC", "amount": 100.5}));
    }

    #[test]
    fn serializes_present_optionals() {
        let value = serde_json::to_value(request(Some("Invoice-1"), Some("GABC"))).unwrap();
        assert_eq!(value["memo"], "Invoice-1");
        assert_eq!(value["recipientAddress"], "GABC");
    }

    #[test]
    fn amount_keeps_large_integers_exact() {
        let amount = Amount::new(Number::from(u64::MAX));
        assert_eq!(amount.as_u64(), Some(u64::MAX));
        assert_eq!(amount.to_string(), u64::MAX.to_string());
    }

    #[test]
    fn accessors_expose_fields() {
        let req = request(Some("m"), None);
        assert_eq!(req.asset_code(), "USDC");
        assert_eq!(req.amount().as_f64(), Some(100.5));
        assert_eq!(req.memo(), Some("m"));
        assert_eq!(req.recipient_address(), None);
    }

    #[test]
    fn try_from_rejects_non_object() {
        let err = LinkScanRequest::try_from(&json!([1, 2])).unwrap_err();
        assert_eq!(
            err.as_slice(),
            &[ValidationFailure::NotAnObject {
                received: JsonKind::Array
            }]
        );
    }

    #[test]
    fn try_from_validates_object() {
        let req = LinkScanRequest::try_from(&json!({"assetCode": "XLM", "amount": 10})).unwrap();
        assert_eq!(req.asset_code(), "XLM");
        assert_eq!(req.amount().as_u64(), Some(10));
    }
}
