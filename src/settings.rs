//! Settings map normalization
//!
//! Connections and webhooks carry a free-form settings bag. The API returns
//! loosely typed values; locally every value is a string. `SettingValue`
//! captures the remote type before formatting so the conversion stays
//! exhaustive.

use crate::types::{JsonObject, JsonValue, StringMap};
use std::collections::BTreeMap;
use std::fmt;

/// A single remote settings value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Nulls, arrays and nested objects
    Other(JsonValue),
}

impl From<&JsonValue> for SettingValue {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::String(s) => SettingValue::String(s.clone()),
            JsonValue::Bool(b) => SettingValue::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(u) = n.as_u64() {
                    SettingValue::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    SettingValue::Int(i)
                } else {
                    n.as_f64()
                        .map_or_else(|| SettingValue::Other(value.clone()), SettingValue::Float)
                }
            }
            other => SettingValue::Other(other.clone()),
        }
    }
}

impl From<JsonValue> for SettingValue {
    fn from(value: JsonValue) -> Self {
        SettingValue::from(&value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<u64> for SettingValue {
    fn from(value: u64) -> Self {
        SettingValue::UInt(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::String(s) => f.write_str(s),
            SettingValue::Int(i) => write!(f, "{i}"),
            SettingValue::UInt(u) => write!(f, "{u}"),
            SettingValue::Float(x) => write!(f, "{x:.6}"),
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Convert a typed settings map into its canonical string form
pub fn normalize(raw: &BTreeMap<String, SettingValue>) -> StringMap {
    raw.iter()
        .map(|(key, value)| (key.clone(), value.to_string()))
        .collect()
}

/// Convert a settings object straight from the wire
pub fn normalize_json(raw: &JsonObject) -> StringMap {
    raw.iter()
        .map(|(key, value)| (key.clone(), SettingValue::from(value).to_string()))
        .collect()
}

/// Encode a local settings map for a request body
pub fn to_wire(settings: &StringMap) -> JsonValue {
    JsonValue::Object(
        settings
            .iter()
            .map(|(key, value)| (key.clone(), JsonValue::String(value.clone())))
            .collect(),
    )
}
