//! Dictionary rendering.
//!
//! Counter groups differ between server builds and configurations, so the
//! renderer never assumes a key set: it prints whatever the document holds,
//! in document order.

use std::fmt::Display;

use serde_json::{Map, Value};

use super::value::display_value;

/// Render a document as one `key: value` line per entry.
///
/// Lines follow the map's iteration order and are joined by `\n` with no
/// trailing newline. An empty map renders as an empty string.
pub fn render(mapping: &Map<String, Value>) -> String {
    render_pairs(
        mapping
            .iter()
            .map(|(key, value)| (key.as_str(), display_value(value))),
    )
}

/// Render only the scalar entries of a document.
///
/// Nested objects and arrays are skipped; used where a document mixes
/// headline counters with large per-host breakdowns.
pub fn render_scalars(mapping: &Map<String, Value>) -> String {
    render_pairs(
        mapping
            .iter()
            .filter(|(_, value)| !value.is_object() && !value.is_array())
            .map(|(key, value)| (key.as_str(), display_value(value))),
    )
}

/// Render a fixed list of labelled values the same way as [`render`].
pub fn render_pairs<K, V, I>(pairs: I) -> String
where
    K: Display,
    V: Display,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
