//! # Field Vocabulary
//!
//! Names of the request fields and the JSON kinds the validator talks
//! about. Wire names are camelCase, matching the HTTP payload.

use serde::Serialize;
use serde_json::Value;

/// A known field of the scan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    /// `assetCode`: the asset to be transferred (e.g. `USDC`).
    #[serde(rename = "assetCode")]
    AssetCode,
    /// `amount`: the amount to be transferred.
    #[serde(rename = "amount")]
    Amount,
    /// `memo`: optional payment memo or reference.
    #[serde(rename = "memo")]
    Memo,
    /// `recipientAddress`: optional recipient address for extra verification.
    #[serde(rename = "recipientAddress")]
    RecipientAddress,
}

impl Field {
    /// All known fields, in declaration order.
    pub const ALL: [Field; 4] = [
        Field::AssetCode,
        Field::Amount,
        Field::Memo,
        Field::RecipientAddress,
    ];

    /// The field's key in the JSON payload.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::AssetCode => "assetCode",
            Self::Amount => "amount",
            Self::Memo => "memo",
            Self::RecipientAddress => "recipientAddress",
        }
    }

    /// Look up a field by its wire name. Matching is exact (case-sensitive).
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The value kind a field is declared to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedKind {
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
}

impl ExpectedKind {
    /// Lowercase name used in messages and response bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

impl std::fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a JSON value as actually received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl JsonKind {
    /// Classify a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lowercase name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
