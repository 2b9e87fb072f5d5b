//! Deserializers for destination rows whose shape is only loosely enforced.
//!
//! Rows written through the admin forms may carry list and object columns as
//! JSON-encoded strings, nulls where an empty list was meant, and ratings as
//! numeric strings. Everything is normalized here so the scoring code only
//! ever sees concrete values.

use serde::de::{DeserializeOwned, Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

/// Deserialize a list column.
///
/// `null` and missing values become an empty list. A string is parsed as a
/// JSON list; if that fails the string itself is tried as a single element.
/// Elements are parsed one by one and malformed ones are dropped, so one bad
/// entry never empties the rest of the list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Array(items) => parse_items(items),
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => parse_items(items),
            _ if raw.trim().is_empty() => Vec::new(),
            _ => serde_json::from_value::<T>(Value::String(raw))
                .map(|item| vec![item])
                .unwrap_or_default(),
        },
        _ => Vec::new(),
    })
}

fn parse_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!("Dropping malformed list element: {}", e);
                None
            }
        })
        .collect()
}

/// Deserialize a text column where `null` means empty.
///
/// Numbers and booleans are kept in their textual form.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Deserialize an optional object column that may be JSON-encoded.
///
/// Unparseable strings become `None` rather than failing the whole row.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::String(raw) => Ok(serde_json::from_str(&raw).ok()),
        other => serde_json::from_value(other).map(Some).map_err(D::Error::custom),
    }
}

/// Deserialize a rating given as a number, a numeric string, or null.
pub fn rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|r| r.is_finite()))
}

/// Deserialize an identifier that some rows store as a number.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
