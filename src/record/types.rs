//! Record types

use crate::error::{Error, Result};
use crate::schema::{schema_for, FieldRole, FieldType, ResourceKind};
use crate::settings;
use crate::types::{JsonObject, JsonValue, StringMap};
use std::collections::BTreeMap;

/// Value of one attribute in a local record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AttrValue {
    /// Explicitly absent
    #[default]
    Null,
    /// Not known until the remote assigns it
    Unknown,
    String(String),
    Bool(bool),
    Map(StringMap),
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AttrValue::Unknown)
    }

    pub fn is_known(&self) -> bool {
        !self.is_null() && !self.is_unknown()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&StringMap> {
        match self {
            AttrValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Check if a known value fits the field type
    pub fn matches(&self, field_type: FieldType) -> bool {
        match self {
            AttrValue::Null | AttrValue::Unknown => true,
            AttrValue::String(_) => field_type == FieldType::String,
            AttrValue::Bool(_) => field_type == FieldType::Bool,
            AttrValue::Map(_) => field_type == FieldType::StringMap,
        }
    }

    /// Name of the value's type, for diagnostics
    pub fn type_label(&self) -> &'static str {
        match self {
            AttrValue::Null => "null",
            AttrValue::Unknown => "unknown",
            AttrValue::String(_) => "string",
            AttrValue::Bool(_) => "bool",
            AttrValue::Map(_) => "map of string",
        }
    }

    /// JSON form; `None` for unknown values
    pub fn to_json(&self) -> Option<JsonValue> {
        match self {
            AttrValue::Null => Some(JsonValue::Null),
            AttrValue::Unknown => None,
            AttrValue::String(s) => Some(JsonValue::String(s.clone())),
            AttrValue::Bool(b) => Some(JsonValue::Bool(*b)),
            AttrValue::Map(m) => Some(settings::to_wire(m)),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<StringMap> for AttrValue {
    fn from(value: StringMap) -> Self {
        AttrValue::Map(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Null, Into::into)
    }
}

static NULL: AttrValue = AttrValue::Null;

/// One resource instance as known to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRecord {
    pub kind: ResourceKind,
    /// Server-assigned identifier; unknown until the first create or import
    pub id: AttrValue,
    /// Attribute values keyed by local field name
    pub values: BTreeMap<String, AttrValue>,
}

impl LocalRecord {
    /// Create an empty record: client fields null, computed fields unknown
    pub fn new(kind: ResourceKind) -> Self {
        let values = schema_for(kind)
            .fields
            .iter()
            .map(|field| {
                let value = if field.role == FieldRole::Computed {
                    AttrValue::Unknown
                } else {
                    AttrValue::Null
                };
                (field.name.to_string(), value)
            })
            .collect();

        Self {
            kind,
            id: AttrValue::Unknown,
            values,
        }
    }

    /// Create a record that only carries an identifier (import entry point)
    pub fn from_id(kind: ResourceKind, id: impl Into<String>) -> Self {
        let mut record = Self::new(kind);
        record.id = AttrValue::String(id.into());
        record
    }

    /// Set an attribute value
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set an attribute value in place
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<AttrValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Attribute value; fields that were never set read as null
    pub fn get(&self, field: &str) -> &AttrValue {
        self.values.get(field).unwrap_or(&NULL)
    }

    /// Known identifier, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_str().filter(|id| !id.is_empty())
    }

    /// Known string attribute, if any
    pub fn string(&self, field: &str) -> Option<&str> {
        self.get(field).as_str()
    }

    /// Known bool attribute, if any
    pub fn bool(&self, field: &str) -> Option<bool> {
        self.get(field).as_bool()
    }

    /// Known map attribute, if any
    pub fn map(&self, field: &str) -> Option<&StringMap> {
        self.get(field).as_map()
    }

    /// JSON object with `id` plus every attribute; unknown values are left out
    pub fn to_json(&self) -> JsonValue {
        let mut object = JsonObject::new();
        if let Some(id) = self.id.to_json() {
            object.insert("id".to_string(), id);
        }
        for (name, value) in &self.values {
            if let Some(json) = value.to_json() {
                object.insert(name.clone(), json);
            }
        }
        JsonValue::Object(object)
    }

    /// Parse a record from its JSON form
    ///
    /// Absent client-supplied attributes are null, absent computed attributes
    /// and an absent identifier are unknown.
    pub fn from_json(kind: ResourceKind, value: &JsonValue) -> Result<Self> {
        let schema = schema_for(kind);
        let object = value
            .as_object()
            .ok_or_else(|| Error::config(format!("{kind} record must be a JSON object")))?;

        if let Some(name) = object
            .keys()
            .find(|key| key.as_str() != "id" && schema.field(key).is_none())
        {
            return Err(Error::invalid_field(kind, name.as_str(), "unsupported attribute"));
        }

        let mut record = Self::new(kind);
        record.id = match object.get("id") {
            None | Some(JsonValue::Null) => AttrValue::Unknown,
            Some(JsonValue::String(s)) if s.is_empty() => AttrValue::Unknown,
            Some(JsonValue::String(s)) => AttrValue::String(s.clone()),
            Some(JsonValue::Number(n)) => AttrValue::String(n.to_string()),
            Some(_) => return Err(Error::invalid_field(kind, "id", "expected a string")),
        };

        for field in schema.fields {
            let Some(raw) = object.get(field.name) else {
                continue;
            };
            let value = match (field.field_type, raw) {
                (_, JsonValue::Null) => AttrValue::Null,
                (FieldType::String, JsonValue::String(s)) => AttrValue::String(s.clone()),
                (FieldType::Bool, JsonValue::Bool(b)) => AttrValue::Bool(*b),
                (FieldType::StringMap, JsonValue::Object(m)) => {
                    AttrValue::Map(settings::normalize_json(m))
                }
                (expected, _) => {
                    return Err(Error::invalid_field(
                        kind,
                        field.name,
                        format!("expected {expected}"),
                    ))
                }
            };
            record.values.insert(field.name.to_string(), value);
        }

        Ok(record)
    }
}

/// Wire-format record returned by the API
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteRecord {
    /// Identifier as returned; empty when the body carried none
    pub id: String,
    /// Remaining attributes keyed by wire name
    pub values: JsonObject,
}

impl RemoteRecord {
    /// Decode a response body
    pub fn from_body(body: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("invalid JSON body: {e}")))?;
        Self::from_value(value)
    }

    /// Decode a parsed response body
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let JsonValue::Object(mut values) = value else {
            return Err(Error::decode("expected a JSON object"));
        };

        let id = match values.remove("id") {
            None | Some(JsonValue::Null) => String::new(),
            Some(JsonValue::String(s)) => s,
            Some(JsonValue::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(Error::decode(format!("unexpected identifier value: {other}")))
            }
        };

        Ok(Self { id, values })
    }

    /// Raw wire value for a key
    pub fn get(&self, wire_name: &str) -> Option<&JsonValue> {
        self.values.get(wire_name)
    }
}
