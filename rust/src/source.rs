//! Monotonic ULID generation source.
//!
//! `UlidField::new()` draws independent random values; two calls within
//! one millisecond are unordered relative to each other. `UlidGen` is
//! the strictly-increasing alternative for callers that batch inserts.

use ulid::Generator;

use crate::field::{UlidField, UlidFieldError};

/// Stateful ULID source with a monotonicity guarantee.
///
/// Within one millisecond the random component is incremented instead
/// of redrawn, so successive values from one source always sort after
/// each other. State is caller-owned; independent sources do not
/// coordinate.
pub struct UlidGen {
    inner: Generator,
}

impl UlidGen {
    /// Create a new source.
    pub fn new() -> Self {
        Self {
            inner: Generator::new(),
        }
    }

    /// Generate the next field value.
    ///
    /// Fails with `SourceOverflow` when the random component is
    /// exhausted for the current millisecond.
    pub fn next_ulid(&mut self) -> Result<UlidField, UlidFieldError> {
        let ulid = self
            .inner
            .generate()
            .map_err(|_| UlidFieldError::SourceOverflow)?;
        Ok(UlidField::from_ulid(ulid))
    }

    /// Generate n field values.
    pub fn next_n(&mut self, n: usize) -> Result<Vec<UlidField>, UlidFieldError> {
        (0..n).map(|_| self.next_ulid()).collect()
    }
}

impl Default for UlidGen {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for UlidGen {
    type Item = UlidField;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_ulid().ok()
    }
}
