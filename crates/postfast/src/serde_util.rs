//! Deserialization helpers for form values.
//!
//! Form fields that were never touched arrive as `""` rather than being absent,
//! so optional fields treat the empty string like a missing value.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `None` for absent, null and `""`; otherwise the value deserialized as `T`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(v) => T::deserialize(v).map(Some).map_err(D::Error::custom),
    }
}

/// Split `a, b,,c ` into `["a", "b", "c"]`.
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A comma-separated field. Yields `None` unless at least one non-blank entry
/// remains, so an all-blank list never reaches the wire.
pub fn comma_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => split_comma_list(&s),
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .flat_map(split_comma_list)
            .collect(),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected a comma-separated string, got {other}"
            )))
        }
    };
    Ok((!entries.is_empty()).then_some(entries))
}
