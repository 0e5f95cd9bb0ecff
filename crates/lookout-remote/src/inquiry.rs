// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding the remote inquiry collection.
//!
//! The collection is a JSON object keyed by inquiry id, in the order the
//! remote returned it. Field shapes drift between writers, so each field is
//! read leniently and an unusable entry is skipped instead of failing the
//! whole poll.

use lookout_core::Inquiry;
use serde_json::{Map, Value};
use tracing::debug;

/// Decode a collection body. `null` and `{}` both mean "no inquiries".
///
/// An array body (what the remote returns for small integer keys) is read
/// with the index as id.
pub fn parse_collection(body: Value) -> Option<Vec<Inquiry>> {
    match body {
        Value::Null => Some(Vec::new()),
        Value::Object(entries) => Some(
            entries
                .into_iter()
                .filter_map(|(id, entry)| parse_entry(id, entry))
                .collect(),
        ),
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .enumerate()
                .filter_map(|(i, entry)| parse_entry(i.to_string(), entry))
                .collect(),
        ),
        _ => None,
    }
}

fn parse_entry(id: String, entry: Value) -> Option<Inquiry> {
    let Value::Object(fields) = entry else {
        if !entry.is_null() {
            debug!(id = %id, "skipping non-object inquiry entry");
        }
        return None;
    };

    Some(Inquiry {
        full_name: text(&fields, "fullName"),
        project_type: project_type(&fields),
        budget: text(&fields, "budget"),
        status: text(&fields, "status"),
        submitted_at: fields.get("submittedAt").and_then(timestamp_millis),
        id,
    })
}

/// A string field, or a number rendered as text.
fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `projectTypes` (a list, joined) wins over a single `projectType`.
fn project_type(fields: &Map<String, Value>) -> Option<String> {
    if let Some(Value::Array(items)) = fields.get("projectTypes") {
        let names: Vec<&str> = items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if !names.is_empty() {
            return Some(names.join(", "));
        }
    }
    text(fields, "projectType")
}

/// Epoch millis from a number, a numeric string, or an RFC 3339 string.
pub fn timestamp_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                chrono::DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.timestamp_millis())
            })
        }
        _ => None,
    }
}
