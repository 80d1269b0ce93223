//! Lenient field decoders for store values.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Reads a boolean stored as `true`/`false`, `0`/`1`, `"true"`/`"1"` or `null`.
pub(super) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => Ok(false),
        Some(JsonValue::Bool(value)) => Ok(value),
        Some(JsonValue::Number(number)) => Ok(number.as_i64().is_some_and(|n| n != 0)),
        Some(JsonValue::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean flag: {other:?}"))),
        },
        Some(other) => Err(D::Error::custom(format!("invalid boolean flag: {other}"))),
    }
}

/// Treats blank strings as absent.
pub(super) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
