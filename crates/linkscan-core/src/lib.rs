#![deny(missing_docs)]

//! # linkscan-core: Payment-Link Scan Request Contract
//!
//! This crate defines the inbound contract of the "scan a payment link"
//! operation: what a well-formed request looks like, and how a raw JSON
//! payload is turned into one. It has no I/O and no internal crate
//! dependencies: only `serde`, `serde_json`, and `thiserror`.
//!
//! ## Design Principles
//!
//! 1. **Validated by construction.** A [`LinkScanRequest`] can only be
//!    obtained from [`validate`] / [`validate_with`]. Holding one means every
//!    field constraint already held.
//!
//! 2. **Complete feedback.** The validator checks every field and returns all
//!    violations at once as [`ValidationFailures`], in field declaration order.
//!
//! 3. **No coercion.** `"100"` is not an amount and `100` is not an asset
//!    code. Type mismatches are reported, never repaired.
//!
//! 4. **Absent means `None`.** Optional fields that were not provided (or were
//!    `null`) are `None`, never an empty string.

pub mod error;
pub mod field;
pub mod request;
pub mod validate;

pub use error::{ValidationFailure, ValidationFailures};
pub use field::{ExpectedKind, Field, JsonKind};
pub use request::{Amount, LinkScanRequest};
pub use validate::{validate, validate_with, ValidatorOptions};
