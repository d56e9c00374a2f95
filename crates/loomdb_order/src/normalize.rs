//! Value normalization applied before comparison.
//!
//! A key order does not compare raw field values: note names fall back to
//! snippets, date timestamps may be truncated to day granularity, and
//! tag/status option identifiers resolve to their display labels first.

use std::collections::HashMap;

use chrono::{DateTime, NaiveTime};

use loomdb_value::{Record, Value};

use crate::keys;

/// Returns the record's field value, with a missing field read as null.
pub(crate) fn field_or_null(record: &Record, key: &str) -> Value {
    record.get(key).cloned().unwrap_or(Value::Null)
}

/// Returns `true` for values the empty-placement policy routes: nulls and
/// empty text.
pub(crate) fn is_empty_text(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(s) => s.is_empty(),
        _ => false,
    }
}

/// Title/snippet substitution for note-like objects.
///
/// Notes carry their text in the snippet field; when sorting such an
/// object by name, an absent or empty name is replaced by the snippet so
/// notes do not all collapse into the empty group.
pub(crate) fn substitute_snippet(record: &Record, key: &str, value: Value) -> Value {
    if key != keys::NAME || layout(record) != keys::LAYOUT_NOTE {
        return value;
    }
    let name = field_or_null(record, keys::NAME);
    if is_empty_text(&name) {
        field_or_null(record, keys::SNIPPET)
    } else {
        name
    }
}

/// Truncates a timestamp value to 00:00:00 UTC of its calendar day.
///
/// Non-numeric values and timestamps outside chrono's representable range
/// pass through unchanged.
pub(crate) fn truncate_to_day(value: Value) -> Value {
    let Value::Number(n) = value else {
        return value;
    };
    match DateTime::from_timestamp(n as i64, 0) {
        Some(ts) => {
            let day = ts.date_naive().and_time(NaiveTime::MIN).and_utc();
            Value::Number(day.timestamp() as f64)
        }
        None => Value::Number(n),
    }
}

/// Resolves tag/status option identifiers to a single comparable text.
///
/// Labels concatenate in the order the identifiers appear in the value;
/// they are not re-sorted. Identifiers missing from the label map
/// contribute nothing, so an unavailable option store degrades every
/// value to empty text rather than failing the comparison.
pub(crate) fn resolve_labels(value: &Value, labels: &HashMap<String, String>) -> Value {
    let mut joined = String::new();
    for id in option_ids(value) {
        if let Some(label) = labels.get(id) {
            joined.push_str(label);
        }
    }
    Value::Text(joined)
}

/// The option identifiers held by a value: a text value is one identifier,
/// a list contributes its text elements in order.
fn option_ids(value: &Value) -> impl Iterator<Item = &str> {
    let ids: Vec<&str> = match value {
        Value::Text(s) => vec![s.as_str()],
        Value::List(items) => items.iter().filter_map(Value::as_text).collect(),
        _ => Vec::new(),
    };
    ids.into_iter()
}

fn layout(record: &Record) -> i64 {
    match record.get(keys::LAYOUT) {
        Some(Value::Number(n)) => *n as i64,
        _ => 0,
    }
}
