//! ulid-field: ULID-valued model fields with generation, validation and
//! column mapping.
//!
//! A ULID packs a 48-bit millisecond timestamp and 80 bits of randomness
//! into 26 Crockford base32 characters. Canonical values sort
//! lexicographically in chronological order, so a ULID column works as a
//! time-ordered primary key.
//!
//! # Format
//!
//! ```text
//! ULID ::= 26 * CROCKFORD          first character "0"-"7"
//! CROCKFORD ::= "0123456789ABCDEFGHJKMNPQRSTVWXYZ"
//! ```
//!
//! # Example
//!
//! ```
//! use ulid_field::{UlidField, is_ulid_string};
//!
//! let id = UlidField::new(); // or UlidField::default() behind #[serde(default)]
//! assert!(is_ulid_string(id.as_str()));
//! assert!(UlidField::parse("").unwrap().is_blank());
//! ```

mod field;
mod source;
mod sql;
mod validate;

pub use field::{
    ParsedUlid, ULID_LEN, UlidField, UlidFieldError, is_ulid_string, new_ulid, parse_ulid,
};
pub use source::UlidGen;
pub use sql::COLUMN_TYPE;
pub use validate::{validate_ulid, validate_ulid_opt};
