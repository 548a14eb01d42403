//! # Request Validator
//!
//! Turns a raw JSON object into a [`LinkScanRequest`] or the complete list of
//! [`ValidationFailures`].
//!
//! The field contract lives in [`SCHEMA`], a static table mapping each field
//! to its presence rule and an ordered list of constraints. The validator
//! walks the table once per request:
//!
//! - every field is checked, failures are collected, nothing short-circuits
//!   across fields;
//! - within one field the first failing constraint wins (a type failure
//!   precludes a range check);
//! - `null` counts as "not provided";
//! - values are never coerced.
//!
//! Validation is a pure function of its input: no state, no I/O, safe to call
//! concurrently from any number of request handlers.

use serde_json::{Map, Value};

use crate::error::{ValidationFailure, ValidationFailures};
use crate::field::{ExpectedKind, Field};
use crate::request::{Amount, LinkScanRequest};

/// Options that tune how strictly a payload is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Report every key outside the schema as
    /// [`ValidationFailure::UnknownField`]. Off by default: unknown keys are
    /// ignored.
    pub forbid_unknown_fields: bool,
}

/// Whether a field must be provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

/// One predicate applied to a provided value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Constraint {
    IsString,
    IsNumber,
    /// String must have at least one character. Whitespace counts.
    NotEmpty,
    /// Number must be `>= min`.
    Min(f64),
}

/// Contract of a single field.
#[derive(Debug)]
struct FieldRule {
    field: Field,
    presence: Presence,
    constraints: &'static [Constraint],
}

/// The request schema, in field declaration order.
const SCHEMA: [FieldRule; 4] = [
    FieldRule {
        field: Field::AssetCode,
        presence: Presence::Required,
        constraints: &[Constraint::IsString, Constraint::NotEmpty],
    },
    FieldRule {
        field: Field::Amount,
        presence: Presence::Required,
        constraints: &[Constraint::IsNumber, Constraint::Min(0.0)],
    },
    FieldRule {
        field: Field::Memo,
        presence: Presence::Optional,
        constraints: &[Constraint::IsString],
    },
    FieldRule {
        field: Field::RecipientAddress,
        presence: Presence::Optional,
        constraints: &[Constraint::IsString],
    },
];

impl FieldRule {
    fn expected(&self) -> ExpectedKind {
        self.constraints
            .iter()
            .find_map(|c| match c {
                Constraint::IsNumber => Some(ExpectedKind::Number),
                Constraint::IsString => Some(ExpectedKind::String),
                _ => None,
            })
            .unwrap_or(ExpectedKind::String)
    }

    /// Check the field against `raw`. `Ok(None)` means an optional field was
    /// not provided.
    fn check<'a>(&self, raw: &'a Map<String, Value>) -> Result<Option<&'a Value>, ValidationFailure> {
        match raw.get(self.field.wire_name()) {
            None | Some(Value::Null) => match self.presence {
                Presence::Required => Err(ValidationFailure::MissingField {
                    field: self.field,
                    expected: self.expected(),
                }),
                Presence::Optional => Ok(None),
            },
            Some(value) => {
                for constraint in self.constraints {
                    constraint.check(self.field, self.expected(), value)?;
                }
                Ok(Some(value))
            }
        }
    }
}

impl Constraint {
    fn check(&self, field: Field, expected: ExpectedKind, value: &Value) -> Result<(), ValidationFailure> {
        let wrong_type = || ValidationFailure::WrongType {
            field,
            expected,
            value: value.clone(),
        };
        match self {
            Self::IsString if !value.is_string() => Err(wrong_type()),
            Self::IsNumber if !value.is_number() => Err(wrong_type()),
            Self::NotEmpty => match value {
                Value::String(s) if s.is_empty() => Err(ValidationFailure::Empty {
                    field,
                    value: s.clone(),
                }),
                _ => Ok(()),
            },
            Self::Min(min) => match value {
                Value::Number(n) if n.as_f64().is_some_and(|v| v < *min) => {
                    Err(ValidationFailure::OutOfRange {
                        field,
                        min: *min,
                        value: n.clone(),
                    })
                }
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

/// Validate a raw JSON object with default [`ValidatorOptions`].
pub fn validate(raw: &Map<String, Value>) -> Result<LinkScanRequest, ValidationFailures> {
    validate_with(raw, ValidatorOptions::default())
}

/// Validate a raw JSON object.
///
/// Returns the request on success, or every violated constraint in field
/// declaration order (unknown keys, when forbidden, come last in key order).
pub fn validate_with(
    raw: &Map<String, Value>,
    options: ValidatorOptions,
) -> Result<LinkScanRequest, ValidationFailures> {
    let mut failures = Vec::new();
    let mut asset_code = None;
    let mut amount = None;
    let mut memo = None;
    let mut recipient_address = None;

    for rule in &SCHEMA {
        match rule.check(raw) {
            Ok(Some(value)) => match (rule.field, value) {
                (Field::AssetCode, Value::String(s)) => asset_code = Some(s.clone()),
                (Field::Amount, Value::Number(n)) => amount = Some(Amount::new(n.clone())),
                (Field::Memo, Value::String(s)) => memo = Some(s.clone()),
                (Field::RecipientAddress, Value::String(s)) => recipient_address = Some(s.clone()),
                _ => {}
            },
            Ok(None) => {}
            Err(failure) => failures.push(failure),
        }
    }

    if options.forbid_unknown_fields {
        failures.extend(
            raw.iter()
                .filter(|(name, _)| Field::from_wire_name(name).is_none())
                .map(|(name, value)| ValidationFailure::UnknownField {
                    name: name.clone(),
                    value: value.clone(),
                }),
        );
    }

    match (asset_code, amount) {
        (Some(asset_code), Some(amount)) if failures.is_empty() => Ok(LinkScanRequest::new(
            asset_code,
            amount,
            memo,
            recipient_address,
        )),
        _ => Err(ValidationFailures(failures)),
    }
}
