//! Input validation applied before any store mutation.

use uuid::Uuid;

use crate::errors::CoreError;

/// Maximum length, in characters, of organization and assessment names.
pub const MAX_NAME_LENGTH: usize = 255;

/// Reject empty (or whitespace-only) names and names over [`MAX_NAME_LENGTH`].
///
/// # Errors
///
/// Returns `CoreError::Validation` describing the violated rule.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    let len = value.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_NAME_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Parse a textual entity reference as a UUID.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `raw` is not a well-formed UUID.
pub fn parse_reference(field: &str, raw: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| CoreError::Validation(format!("invalid {field} '{raw}': {e}")))
}
