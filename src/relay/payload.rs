//! Inbound body parsing.
//!
//! The body is plain JSON of the shape
//! `{ "url": string, "headers"?: object, "data"?: object }`, but nothing about
//! it is trusted: each field is looked up and shape-checked on its own.

use serde_json::{Map, Value};

use crate::relay::error::RelayError;

/// A validated relay request, ready to be sent upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayRequest {
    /// Target URL, not yet parsed; the outbound client rejects bad ones.
    pub url: String,
    /// Caller-supplied headers, in the order given.
    pub headers: Vec<(String, String)>,
    /// Outbound JSON payload; always an object.
    pub data: Value,
}

impl RelayRequest {
    /// Parse and validate a raw inbound body.
    pub fn from_body(body: &[u8]) -> Result<Self, RelayError> {
        let parsed: Value = serde_json::from_slice(body).map_err(|_| RelayError::InvalidJson)?;

        let fields = match parsed {
            Value::Object(fields) => fields,
            // A literal `null` body cannot even be inspected for a url.
            Value::Null => return Err(RelayError::InvalidJson),
            _ => return Err(RelayError::MissingUrl),
        };

        let url = match fields.get("url") {
            Some(Value::String(url)) if !url.is_empty() => url.clone(),
            Some(other) if is_truthy(other) => other.to_string(),
            _ => return Err(RelayError::MissingUrl),
        };

        let headers = match fields.get("headers") {
            Some(Value::Object(map)) => header_pairs(map),
            _ => Vec::new(),
        };

        let data = match fields.get("data") {
            Some(Value::Object(map)) => Value::Object(map.clone()),
            _ => Value::Object(Map::new()),
        };

        Ok(Self { url, headers, data })
    }
}

/// JavaScript-style truthiness for a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Flatten a header object to name/value text. Nulls are dropped,
/// scalars are stringified, nested values are sent as their JSON text.
fn header_pairs(map: &Map<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .filter_map(|(name, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((name.clone(), text))
        })
        .collect()
}
