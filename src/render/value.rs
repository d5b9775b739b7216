//! Display form of snapshot values.

use serde_json::Value;

/// Bytes in one mebibyte.
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Extended-JSON wrappers that carry a single number as a string.
const NUMBER_WRAPPERS: &[&str] = &["$numberLong", "$numberInt", "$numberDouble", "$numberDecimal"];

/// Display a snapshot value for a report line.
///
/// Strings are printed bare, extended-JSON number wrappers are unwrapped,
/// and nested documents fall back to compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) if map.len() == 1 => {
            let wrapped = NUMBER_WRAPPERS
                .iter()
                .find_map(|key| map.get(*key))
                .and_then(Value::as_str);
            match wrapped {
                Some(number) => number.to_string(),
                None => value.to_string(),
            }
        }
        other => other.to_string(),
    }
}

/// Convert a byte count to whole mebibytes, rounding half away from zero.
pub fn format_mb(bytes: f64) -> f64 {
    (bytes / BYTES_PER_MB).round()
}
