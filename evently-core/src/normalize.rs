//! Coercion of loosely shaped JSON into canonical values.
//!
//! Backend payloads are not trusted to be well formed: a field may be
//! missing, `null`, or of the wrong type. Every such field is coerced here to
//! its canonical empty value, so callers never need to check shapes again.
//!
//! Rules:
//! - strings: a JSON string is kept, anything else becomes `""`
//! - ids: a JSON integer (or integral float) is kept, anything else is absent
//! - id lists: a JSON array keeps its integer elements in order, anything
//!   else becomes an empty list
//! - category lists: a JSON array keeps elements that carry an integer `id`
//!   and a string `name`, anything else becomes an empty list
//! - user lists: a JSON array keeps elements that carry an integer `id`,
//!   with `name` and `image` coerced as strings

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{EventlyError, EventlyResult};
use crate::event::{Category, Event, User};

pub fn string_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

pub fn optional_id(value: Option<&Value>) -> Option<i64> {
    let number = match value? {
        Value::Number(n) => n,
        _ => return None,
    };

    if let Some(id) = number.as_i64() {
        return Some(id);
    }

    // Integral floats such as `2.0` still name an id
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}

pub fn id_list(value: Option<&Value>) -> Vec<i64> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| optional_id(Some(v))).collect(),
        _ => Vec::new(),
    }
}

pub fn category_list(value: Option<&Value>) -> Vec<Category> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let id = optional_id(item.get("id"))?;
            let name = item.get("name")?.as_str()?;
            Some(Category::new(id, name))
        })
        .collect()
}

pub fn user_list(value: Option<&Value>) -> Vec<User> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            Some(User {
                id: optional_id(item.get("id"))?,
                name: string_or_empty(item.get("name")),
                image: string_or_empty(item.get("image")),
            })
        })
        .collect()
}

/// Load a sequence of events from a raw JSON payload.
///
/// The payload itself must be an array; anything else is `InvalidInput`.
/// Elements that are not JSON objects are skipped.
pub fn event_list(value: &Value) -> EventlyResult<Vec<Event>> {
    let Value::Array(items) = value else {
        return Err(EventlyError::InvalidInput(format!(
            "expected a sequence of events, got {}",
            json_kind(value)
        )));
    };

    let events = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                tracing::warn!(index, kind = json_kind(item), "Skipping non-object event entry");
                return None;
            }
            serde_json::from_value(item.clone()).ok()
        })
        .collect();

    Ok(events)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Serde adapters used by the record types in `crate::event`.

pub(crate) fn de_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(string_or_empty(Some(&value)))
}

pub(crate) fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(optional_id(Some(&value)).unwrap_or_default())
}

pub(crate) fn de_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(optional_id(Some(&value)))
}

pub(crate) fn de_id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(id_list(Some(&value)))
}
