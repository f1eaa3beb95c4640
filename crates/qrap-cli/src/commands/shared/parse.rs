use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Parse a `SCREAMING_SNAKE_CASE` enum value using serde-deserialization.
///
/// Accepts any case and `-` in place of `_` (`in-progress`, `IN_PROGRESS`).
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_").to_ascii_uppercase();
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an optional enum flag.
pub fn parse_opt_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|raw| parse_enum(raw, field)).transpose()
}

/// Parse an entity ID argument.
pub fn parse_id(raw: &str, field: &str) -> anyhow::Result<Uuid> {
    Ok(qrap_core::validation::parse_reference(field, raw)?)
}
