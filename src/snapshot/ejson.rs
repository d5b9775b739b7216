//! Tolerant reading of MongoDB extended JSON scalars.
//!
//! The shell prints 64-bit counters as plain numbers in relaxed mode but as
//! `{"$numberLong": "..."}` in canonical mode, and dates either as ISO
//! strings or as `{"$date": ...}`. Snapshot views accept every form.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a number from a plain JSON number or an extended-JSON wrapper.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Object(map) => ["$numberLong", "$numberInt", "$numberDouble", "$numberDecimal"]
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(|inner| match inner {
                Value::String(s) => s.parse().ok(),
                other => as_f64(other),
            }),
        _ => None,
    }
}

/// Read a non-negative integer without going through a float.
///
/// `$numberLong` strings are parsed directly; whole floats are accepted.
pub fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::Object(map) => ["$numberLong", "$numberInt"]
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(|inner| match inner {
                Value::String(s) => s.parse().ok(),
                other => as_u64(other),
            }),
        _ => None,
    }
}

/// Read a date from an ISO-8601 string, epoch milliseconds or `{"$date": ...}`.
pub fn as_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Object(map) => map.get("$date").and_then(as_datetime_inner),
        Value::Number(_) => as_datetime_inner(value),
        _ => None,
    }
}

fn as_datetime_inner(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(_) => as_datetime(value),
        other => {
            let millis = as_f64(other)? as i64;
            Utc.timestamp_millis_opt(millis).single()
        }
    }
}

/// Serde adapter for numeric fields that may arrive wrapped.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_f64(&value).ok_or_else(|| serde::de::Error::custom(format!("expected a number, got {value}")))
}

/// Serde adapter for counters, kept exact past 2^53.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_u64(&value).ok_or_else(|| serde::de::Error::custom(format!("expected a count, got {value}")))
}
