//! # Validation Failures
//!
//! Structured failure types produced by the validator, built with `thiserror`.
//!
//! Every failure names the field it concerns, what was expected, and the
//! offending value when there was one, so that the HTTP boundary can render
//! complete client feedback without re-inspecting the payload.

use serde_json::{Number, Value};
use thiserror::Error;

use crate::field::{ExpectedKind, Field, JsonKind};

/// Field name reported for failures that concern the payload as a whole.
pub const ROOT_FIELD: &str = "$";

/// A single violated field constraint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    /// A required field is absent or `null`.
    #[error("{field} is required and must be a {expected}")]
    MissingField {
        /// The missing field.
        field: Field,
        /// The kind the field is declared to hold.
        expected: ExpectedKind,
    },

    /// A field is present but holds the wrong JSON kind.
    #[error("{field} must be a {expected}, received {}", JsonKind::of(.value))]
    WrongType {
        /// The offending field.
        field: Field,
        /// The kind the field is declared to hold.
        expected: ExpectedKind,
        /// The value as received.
        value: Value,
    },

    /// A string field that must carry content is the empty string.
    #[error("{field} must not be empty")]
    Empty {
        /// The offending field.
        field: Field,
        /// The string as received.
        value: String,
    },

    /// A numeric field is below its minimum.
    #[error("{field} must not be less than {min}, received {value}")]
    OutOfRange {
        /// The offending field.
        field: Field,
        /// Inclusive lower bound.
        min: f64,
        /// The number as received.
        value: Number,
    },

    /// A key outside the request schema, reported only when unknown fields
    /// are forbidden.
    #[error("property {name} should not exist")]
    UnknownField {
        /// The unexpected key.
        name: String,
        /// Its value.
        value: Value,
    },

    /// The payload is not a JSON object.
    #[error("request payload must be a JSON object, received {received}")]
    NotAnObject {
        /// The kind that was received instead.
        received: JsonKind,
    },
}

impl ValidationFailure {
    /// Machine-readable failure kind (e.g. `"MISSING_FIELD"`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::WrongType { .. } => "WRONG_TYPE",
            Self::Empty { .. } => "EMPTY",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::UnknownField { .. } => "UNKNOWN_FIELD",
            Self::NotAnObject { .. } => "NOT_AN_OBJECT",
        }
    }

    /// Wire name of the field concerned, or [`ROOT_FIELD`] for whole-payload
    /// failures.
    pub fn field_name(&self) -> &str {
        match self {
            Self::MissingField { field, .. }
            | Self::WrongType { field, .. }
            | Self::Empty { field, .. }
            | Self::OutOfRange { field, .. } => field.wire_name(),
            Self::UnknownField { name, .. } => name,
            Self::NotAnObject { .. } => ROOT_FIELD,
        }
    }

    /// The known field concerned, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::MissingField { field, .. }
            | Self::WrongType { field, .. }
            | Self::Empty { field, .. }
            | Self::OutOfRange { field, .. } => Some(*field),
            Self::UnknownField { .. } | Self::NotAnObject { .. } => None,
        }
    }

    /// The declared kind of the field, where one applies.
    pub fn expected(&self) -> Option<ExpectedKind> {
        match self {
            Self::MissingField { expected, .. } | Self::WrongType { expected, .. } => {
                Some(*expected)
            }
            Self::Empty { .. } => Some(ExpectedKind::String),
            Self::OutOfRange { .. } => Some(ExpectedKind::Number),
            Self::UnknownField { .. } | Self::NotAnObject { .. } => None,
        }
    }

    /// The offending value. `None` means the field was missing.
    pub fn value(&self) -> Option<Value> {
        match self {
            Self::WrongType { value, .. } | Self::UnknownField { value, .. } => Some(value.clone()),
            Self::OutOfRange { value, .. } => Some(Value::Number(value.clone())),
            Self::Empty { value, .. } => Some(Value::String(value.clone())),
            Self::MissingField { .. } | Self::NotAnObject { .. } => None,
        }
    }
}

/// All failures of one validation run, in field declaration order.
///
/// Never empty: a run with no failures produces a request, not this type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailures(pub(crate) Vec<ValidationFailure>);

impl ValidationFailures {
    /// Wrap a list of failures. Returns `None` for an empty list.
    pub fn new(failures: Vec<ValidationFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self(failures))
        }
    }

    /// The failures as a slice.
    pub fn as_slice(&self) -> &[ValidationFailure] {
        &self.0
    }

    /// Iterate over the failures.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationFailure> {
        self.0.iter()
    }

    /// Number of failures (at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any failure concerns the given field.
    pub fn concerns(&self, field: Field) -> bool {
        self.0.iter().any(|f| f.field() == Some(field))
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<ValidationFailure> {
        self.0
    }
}

impl std::fmt::Display for ValidationFailures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailures {}

impl IntoIterator for ValidationFailures {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationFailures {
    type Item = &'a ValidationFailure;
    type IntoIter = std::slice::Iter<'a, ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
