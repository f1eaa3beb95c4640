//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and the text encodings
//! used in storage.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Format a timestamp for storage.
///
/// Fixed-width RFC 3339 UTC with microseconds (`2026-02-09T14:30:00.000000Z`),
/// so `ORDER BY` on the text column is chronological.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000000Z"`) and `SQLite`'s
/// default format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all qrap-core enums (`SCREAMING_SNAKE_CASE`).
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the string does not match any
/// variant. An unrecognised stored value is bad data, not a failed query.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::InvalidState(format!("unrecognised stored value '{s}': {e}")))
}

/// Parse a TEXT column holding a hyphenated UUID.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the text is not a UUID.
pub fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::Query(format!("Invalid UUID '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a non-negative INTEGER column (counts, `assets_scanned`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the value is negative or out of range.
pub fn get_count<T: TryFrom<i64>>(row: &libsql::Row, idx: i32) -> Result<T, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    T::try_from(raw).map_err(|_| DatabaseError::Query(format!("Count out of range: {raw}")))
}

/// Encode an asset list as a JSON array for the `target_assets` column.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn encode_assets(assets: &[String]) -> Result<String, DatabaseError> {
    serde_json::to_string(assets).map_err(|e| DatabaseError::Other(e.into()))
}

/// Decode the `target_assets` column. An empty string reads as no assets.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column is not a JSON string array.
pub fn decode_assets(s: &str) -> Result<Vec<String>, DatabaseError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Query(format!("Invalid target_assets JSON: {e}")))
}
