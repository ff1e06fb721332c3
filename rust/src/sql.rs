//! SQLite column mapping for ULID fields.
//!
//! A `UlidField` binds as its canonical text, blank as the empty
//! string, and loads back through the strict parser, so a malformed
//! stored value surfaces as a conversion error instead of leaking into
//! the model. `Option<UlidField>` maps NULL through rusqlite's blanket
//! impls.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::field::UlidField;

/// Column type for schema declarations. ULIDs are fixed width.
pub const COLUMN_TYPE: &str = "CHAR(26)";

impl ToSql for UlidField {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for UlidField {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Self::parse(text).map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}
