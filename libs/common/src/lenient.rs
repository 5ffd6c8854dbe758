//! Lenient field decoders for form-style JSON payloads
//!
//! Browser forms send whatever the input produced: a zip code or phone
//! number may arrive as a JSON number, a price as a numeric string. These
//! decoders accept such values instead of failing the whole body. Values
//! that cannot be interpreted decode as absent, so the usual required-field
//! validation reports them.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a string field, accepting numbers as their decimal text
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Decode a number field, accepting numeric strings
pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(number.as_f64()),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("expected a number")),
        Some(_) => Err(serde::de::Error::custom("expected a number")),
    }
}
