//! ULID field values: generation, strict validation and parsing.
//!
//! Format: 26 characters from the Crockford base32 alphabet
//! `0123456789ABCDEFGHJKMNPQRSTVWXYZ`, first character `0`-`7`.
//! Lexicographic order of canonical values equals chronological order.
//!
//! `UlidField` is the storable value (a canonical ULID or blank).
//! Use `new_ulid()` for a bare canonical string.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Errors that can occur during ULID field operations.
#[derive(Error, Debug)]
pub enum UlidFieldError {
    #[error("{value:?} is not a valid ULID")]
    NotAUlid { value: String },
    #[error("ULID source overflow: random component exhausted for the current millisecond")]
    SourceOverflow,
}

/// Canonical encoded length, and the fixed column width.
pub const ULID_LEN: usize = 26;

/// Crockford base32, uppercase. Excludes I, L, O and U.
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Parsed ULID components.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUlid {
    pub raw: String,
    pub timestamp: DateTime<Utc>,
    pub randomness: u128,
}

impl ParsedUlid {
    /// Get the timestamp component in Unix milliseconds.
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp.timestamp_millis() as u64
    }
}

fn is_canonical(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == ULID_LEN
        && matches!(bytes[0], b'0'..=b'7')
        && bytes.iter().all(|b| ALPHABET.contains(b))
}

/// Generate a fresh canonical ULID string.
pub fn new_ulid() -> String {
    Ulid::new().to_string()
}

/// Check whether a string is a canonical ULID.
///
/// Strict: lowercase spellings, wrong lengths, excluded letters and
/// encodings above `7ZZZ...Z` (128-bit overflow) are all rejected.
pub fn is_ulid_string(value: &str) -> bool {
    parse_ulid(value).is_ok()
}

/// Parse a canonical ULID string into its components.
pub fn parse_ulid(value: &str) -> Result<ParsedUlid, UlidFieldError> {
    if !is_canonical(value) {
        return Err(UlidFieldError::NotAUlid {
            value: value.to_string(),
        });
    }

    let ulid = Ulid::from_string(value).map_err(|_| UlidFieldError::NotAUlid {
        value: value.to_string(),
    })?;

    Ok(ParsedUlid {
        raw: value.to_string(),
        timestamp: DateTime::<Utc>::from(ulid.datetime()),
        randomness: ulid.random(),
    })
}

/// A ULID-valued model field.
///
/// Holds either a canonical 26-character ULID or the blank value (the
/// empty string). `Default` and `new()` generate a fresh ULID; behind
/// `#[serde(default)]` an absent key does the same, while an explicit
/// empty string deserializes to blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UlidField(String);

impl UlidField {
    /// Create a field holding a freshly generated ULID.
    pub fn new() -> Self {
        Self(new_ulid())
    }

    /// Create a blank field.
    pub fn blank() -> Self {
        Self(String::new())
    }

    /// Whether the field holds the blank value.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a field value from a string.
    ///
    /// The empty string is accepted as blank; anything else must be a
    /// canonical ULID.
    pub fn parse(value: &str) -> Result<Self, UlidFieldError> {
        if value.is_empty() {
            return Ok(Self::blank());
        }
        parse_ulid(value)?;
        Ok(Self(value.to_string()))
    }

    /// Create a field from a decoded ULID.
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid.to_string())
    }

    /// Decode the held value. `None` when blank.
    pub fn ulid(&self) -> Option<Ulid> {
        Ulid::from_string(&self.0).ok()
    }

    /// Timestamp component in Unix milliseconds. `None` when blank.
    pub fn timestamp_ms(&self) -> Option<u64> {
        self.ulid().map(|u| u.timestamp_ms())
    }

    /// Timestamp component as a UTC datetime. `None` when blank.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        self.ulid().map(|u| DateTime::<Utc>::from(u.datetime()))
    }

    /// The stored string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the field and return the stored string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for UlidField {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UlidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UlidField {
    type Err = UlidFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for UlidField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Ulid> for UlidField {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl serde::Serialize for UlidField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for UlidField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
    const SAMPLE_MS: u64 = 1_469_922_850_259;

    #[test]
    fn test_new_ulid_shape() {
        let id = new_ulid();
        assert_eq!(id.len(), ULID_LEN);
        assert!(is_ulid_string(&id));
    }

    #[test]
    fn test_validate_valid_strings() {
        assert!(is_ulid_string(SAMPLE));
        assert!(is_ulid_string("00000000000000000000000000"));
        assert!(is_ulid_string("7ZZZZZZZZZZZZZZZZZZZZZZZZZ"));
    }

    #[test]
    fn test_validate_invalid_strings() {
        assert!(!is_ulid_string(""));
        assert!(!is_ulid_string("invalid-ulid-string"));
        assert!(!is_ulid_string("01ILOU567890123456789012IL"));
        assert!(!is_ulid_string("01arz3ndektsv4rrffq69g5fav"));
        assert!(!is_ulid_string("01ARZ3NDEKTSV4RRFFQ69G5FA"));
        assert!(!is_ulid_string("01ARZ3NDEKTSV4RRFFQ69G5FAVX"));
        assert!(!is_ulid_string("8ZZZZZZZZZZZZZZZZZZZZZZZZZ"));
        assert!(!is_ulid_string("é1ARZ3NDEKTSV4RRFFQ69G5FA"));
    }

    #[test]
    fn test_parse_components() {
        let p = parse_ulid(SAMPLE).unwrap();
        assert_eq!(p.raw, SAMPLE);
        assert_eq!(p.timestamp_ms(), SAMPLE_MS);
        assert_eq!(
            p.timestamp,
            Utc.timestamp_millis_opt(SAMPLE_MS as i64).unwrap()
        );
        assert!(p.randomness > 0);
    }

    #[test]
    fn test_parse_invalid_cases() {
        assert!(matches!(
            parse_ulid("invalid-ulid-string"),
            Err(UlidFieldError::NotAUlid { .. })
        ));
        assert!(matches!(parse_ulid(""), Err(UlidFieldError::NotAUlid { .. })));
        let err = parse_ulid("invalid-ulid-string").unwrap_err();
        assert!(err.to_string().contains("not a valid ULID"));
    }

    #[test]
    fn test_field_default_generates() {
        let field = UlidField::default();
        assert!(!field.is_blank());
        assert_eq!(field.as_str().len(), ULID_LEN);
        assert!(is_ulid_string(field.as_str()));
    }

    #[test]
    fn test_field_blank() {
        let field = UlidField::blank();
        assert!(field.is_blank());
        assert_eq!(field.as_str(), "");
        assert_eq!(field.ulid(), None);
        assert_eq!(field.timestamp_ms(), None);
        assert_eq!(field.datetime(), None);
    }

    #[test]
    fn test_field_parse() {
        let field = UlidField::parse(SAMPLE).unwrap();
        assert_eq!(field.as_str(), SAMPLE);
        assert_eq!(field.timestamp_ms(), Some(SAMPLE_MS));

        assert!(UlidField::parse("").unwrap().is_blank());
        assert!(matches!(
            UlidField::parse("invalid-ulid-string"),
            Err(UlidFieldError::NotAUlid { .. })
        ));
        assert!(matches!(
            UlidField::parse("01arz3ndektsv4rrffq69g5fav"),
            Err(UlidFieldError::NotAUlid { .. })
        ));
    }

    #[test]
    fn test_field_round_trips() {
        let field: UlidField = SAMPLE.parse().unwrap();
        assert_eq!(field.to_string(), SAMPLE);
        assert_eq!(field.as_ref(), SAMPLE);
        assert_eq!(field.clone().into_string(), SAMPLE);

        let ulid = field.ulid().unwrap();
        assert_eq!(UlidField::from(ulid), field);
        assert_eq!(ulid.timestamp_ms(), SAMPLE_MS);
    }

    #[test]
    fn test_field_serde() {
        let field: UlidField = SAMPLE.parse().unwrap();
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));

        let back: UlidField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);

        let blank: UlidField = serde_json::from_str("\"\"").unwrap();
        assert!(blank.is_blank());

        let err = serde_json::from_str::<UlidField>("\"invalid-ulid-string\"").unwrap_err();
        assert!(err.to_string().contains("not a valid ULID"));
    }
}
