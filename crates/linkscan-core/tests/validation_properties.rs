//! # Property Tests for the Scan Request Validator
//!
//! Exercises the validator over generated payloads: acceptance of every
//! well-formed request (whitespace and non-ASCII asset codes included),
//! rejection of negative amounts and missing asset codes, absence of
//! optional fields, and determinism.

use linkscan_core::{validate, ExpectedKind, Field, LinkScanRequest, ValidationFailure};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Arbitrary JSON leaf values of every kind.
fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e9f64..1.0e9).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 _-]{0,20}".prop_map(Value::String),
    ]
}

/// Objects that mix known and unknown keys with arbitrary leaf values.
fn json_object() -> impl Strategy<Value = Map<String, Value>> {
    let key = prop_oneof![
        Just("assetCode".to_string()),
        Just("amount".to_string()),
        Just("memo".to_string()),
        Just("recipientAddress".to_string()),
        "[a-z]{1,10}",
    ];
    prop::collection::btree_map(key, json_leaf(), 0..6).prop_map(|m| m.into_iter().collect())
}

/// Any non-empty string: printable text in any script, or bare whitespace.
fn asset_code() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{1,24}",
        "[ \t\n\r]{1,6}",
        "[A-Z]{1,4}[A-Z0-9]{0,8}",
    ]
}

fn non_negative_amount() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<u64>().prop_map(|n| json!(n)),
        (0.0f64..1.0e15).prop_map(|f| json!(f)),
    ]
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

proptest! {
    /// Every well-formed payload is accepted and the request mirrors it.
    #[test]
    fn well_formed_payloads_are_accepted(
        code in asset_code(),
        amount in non_negative_amount(),
        memo in proptest::option::of("[ -~]{0,40}"),
        recipient in proptest::option::of("G[A-Z2-7]{0,55}"),
    ) {
        let mut raw = as_object(json!({"assetCode": code.clone(), "amount": amount.clone()}));
        if let Some(m) = &memo {
            raw.insert("memo".into(), json!(m));
        }
        if let Some(r) = &recipient {
            raw.insert("recipientAddress".into(), json!(r));
        }

        let req = validate(&raw).unwrap();
        prop_assert_eq!(req.asset_code(), code.as_str());
        prop_assert_eq!(&Value::Number(req.amount().as_number().clone()), &amount);
        prop_assert_eq!(req.memo(), memo.as_deref());
        prop_assert_eq!(req.recipient_address(), recipient.as_deref());
    }

    /// Every non-empty string asset code is accepted and serialized back unchanged.
    #[test]
    fn non_empty_asset_codes_round_trip(code in asset_code(), amount in non_negative_amount()) {
        let raw = as_object(json!({"assetCode": code.clone(), "amount": amount}));
        let req = validate(&raw).unwrap();
        prop_assert_eq!(req.asset_code(), code.as_str());
        let out = serde_json::to_value(&req).unwrap();
        prop_assert_eq!(&out["assetCode"], &Value::String(code));
    }

    /// Absent optional fields stay absent and never reappear on serialization.
    #[test]
    fn absent_optionals_are_not_serialized(code in asset_code(), amount in non_negative_amount()) {
        let raw = as_object(json!({"assetCode": code, "amount": amount}));
        let req = validate(&raw).unwrap();
        prop_assert!(req.memo().is_none());
        prop_assert!(req.recipient_address().is_none());
        let out = serde_json::to_value(&req).unwrap();
        prop_assert!(out.get("memo").is_none());
        prop_assert!(out.get("recipientAddress").is_none());
    }

    /// Any negative amount yields an OUT_OF_RANGE failure on `amount`.
    #[test]
    fn negative_amounts_are_out_of_range(
        code in asset_code(),
        amount in prop_oneof![
            (i64::MIN..0i64).prop_map(|n| json!(n)),
            (-1.0e15f64..-1.0e-9).prop_map(|f| json!(f)),
        ],
    ) {
        let raw = as_object(json!({"assetCode": code, "amount": amount}));
        let err = validate(&raw).unwrap_err();
        prop_assert_eq!(err.len(), 1);
        let is_out_of_range = matches!(
            &err.as_slice()[0],
            ValidationFailure::OutOfRange { field: Field::Amount, .. }
        );
        prop_assert!(is_out_of_range);
    }

    /// A payload without `assetCode` always reports it as missing.
    #[test]
    fn missing_asset_code_is_always_reported(mut raw in json_object()) {
        raw.remove("assetCode");
        let err = validate(&raw).unwrap_err();
        let expected = ValidationFailure::MissingField {
            field: Field::AssetCode,
            expected: ExpectedKind::String,
        };
        prop_assert!(err.iter().any(|f| f == &expected));
    }

    /// Validation is a pure function of its input.
    #[test]
    fn validation_is_deterministic(raw in json_object()) {
        prop_assert_eq!(validate(&raw), validate(&raw));
    }

    /// Failures are reported in schema order.
    #[test]
    fn failures_follow_field_declaration_order(raw in json_object()) {
        if let Err(err) = validate(&raw) {
            let fields: Vec<Field> = err.iter().filter_map(ValidationFailure::field).collect();
            let mut sorted = fields.clone();
            sorted.sort();
            prop_assert_eq!(fields, sorted);
        }
    }

    /// Object validation and `TryFrom<&Value>` agree.
    #[test]
    fn try_from_matches_validate(raw in json_object()) {
        let via_value = LinkScanRequest::try_from(&Value::Object(raw.clone()));
        prop_assert_eq!(via_value, validate(&raw));
    }
}

#[test]
fn non_object_payloads_are_rejected_as_a_whole() {
    for value in [json!(null), json!(1), json!("USDC"), json!([{"assetCode": "USDC"}])] {
        let err = LinkScanRequest::try_from(&value).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.as_slice()[0].kind(), "NOT_AN_OBJECT");
    }
}
