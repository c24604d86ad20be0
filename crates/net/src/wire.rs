//! Listing decoder
//!
//! The store keys each record by an opaque push id. Object keys come back in
//! sorted order, which for push ids tracks insertion order. Stores that were
//! written with integer keys answer with an array instead, holes as `null`.

use moodlog_core::MoodEntry;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

/// Decode a `GET` body into entries, skipping records that don't parse
pub fn decode_listing(body: &[u8]) -> Result<Vec<MoodEntry>> {
    let value: Value = serde_json::from_slice(body)?;

    let records: Vec<(String, Value)> = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        other => {
            warn!(kind = %value_kind(&other), "Unexpected listing shape");
            return Ok(Vec::new());
        }
    };

    let mut entries = Vec::with_capacity(records.len());
    for (key, record) in records {
        match serde_json::from_value::<MoodEntry>(record) {
            Ok(entry) if !entry.moods.is_empty() => entries.push(entry),
            Ok(_) => warn!(key = %key, "Skipping record with no moods"),
            Err(e) => warn!(key = %key, error = %e, "Skipping malformed record"),
        }
    }
    Ok(entries)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
