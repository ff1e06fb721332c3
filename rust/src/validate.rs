//! Validation rules for ULID-valued model fields.
//!
//! `validate_ulid` is shaped for the `validator` derive: attach it to a
//! string field with `#[validate(custom(function = validate_ulid))]`.
//! Blank values pass (blank handling belongs to the model layer), absent
//! values pass, everything else must be a canonical ULID.

use std::borrow::Cow;
use validator::ValidationError;

use crate::field::is_ulid_string;

/// Validate a candidate ULID string.
///
/// The empty string and canonical ULIDs succeed. Every other input
/// yields one error with code `ulid` and message `not a valid ULID`.
pub fn validate_ulid(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_ulid_string(value) {
        return Ok(());
    }

    let mut err = ValidationError::new("ulid");
    err.message = Some(Cow::Borrowed("not a valid ULID"));
    err.add_param(Cow::from("value"), &value);
    Err(err)
}

/// Validate an optional ULID string. `None` succeeds.
pub fn validate_ulid_opt(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) => validate_ulid(v),
        None => Ok(()),
    }
}
