//! Conversion between local records and the wire format
//!
//! Requests: required attributes are always sent, null optional attributes
//! are omitted, known values (including empty strings) are sent verbatim and
//! computed attributes are never sent.
//!
//! Responses: every attribute of the kind is overwritten. Fields whose
//! presence policy is `NullWhenZero` map a missing, null or zero remote value
//! to null; all other fields map it to the known zero value.

use super::types::{AttrValue, LocalRecord, RemoteRecord};
use crate::error::{Error, Result};
use crate::schema::{
    schema_for, FieldDescriptor, FieldRole, FieldType, Presence, ResourceKind, ResourceSchema,
};
use crate::settings;
use crate::types::{JsonObject, JsonValue};

/// Reject a desired record that cannot be sent as-is
pub fn validate_desired(schema: &ResourceSchema, desired: &LocalRecord) -> Result<()> {
    let kind = schema.kind;

    if desired.kind != kind {
        return Err(Error::config(format!(
            "expected a {kind} record, got a {} record",
            desired.kind
        )));
    }

    if let Some(name) = desired.values.keys().find(|name| schema.field(name).is_none()) {
        return Err(Error::invalid_field(kind, name.as_str(), "unsupported attribute"));
    }

    for field in schema.fields {
        let value = desired.get(field.name);

        if !value.matches(field.field_type) {
            return Err(Error::invalid_field(
                kind,
                field.name,
                format!("expected {}, got {}", field.field_type, value.type_label()),
            ));
        }

        match field.role {
            FieldRole::Required if !value.is_known() => {
                return Err(Error::missing_field(kind, field.name));
            }
            FieldRole::Optional if value.is_unknown() => {
                return Err(Error::invalid_field(
                    kind,
                    field.name,
                    "value is not known yet",
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Build the create/update body for a validated desired record
pub fn request_body(schema: &ResourceSchema, desired: &LocalRecord) -> Result<JsonObject> {
    validate_desired(schema, desired)?;

    let mut body = JsonObject::new();
    for field in schema.fields.iter().filter(|f| f.is_client_supplied()) {
        // null here is "not supplied"; validation already rejected unknowns
        if let Some(json) = desired.get(field.name).to_json().filter(|v| !v.is_null()) {
            body.insert(field.wire_name.to_string(), json);
        }
    }
    Ok(body)
}

impl RemoteRecord {
    /// Map a wire record into a full local record, applying null-normalization
    pub fn into_local(self, kind: ResourceKind) -> Result<LocalRecord> {
        let schema = schema_for(kind);
        let mut record = LocalRecord::new(kind);
        record.id = if self.id.is_empty() {
            AttrValue::Unknown
        } else {
            AttrValue::String(self.id.clone())
        };

        for field in schema.fields {
            let value = decode_field(schema, field, self.get(field.wire_name))?;
            record.values.insert(field.name.to_string(), value);
        }

        Ok(record)
    }
}

fn decode_field(
    schema: &ResourceSchema,
    field: &FieldDescriptor,
    raw: Option<&JsonValue>,
) -> Result<AttrValue> {
    let raw = raw.unwrap_or(&JsonValue::Null);
    let unexpected = || {
        Error::decode(format!(
            "{} attribute '{}' has unexpected value {raw}",
            schema.kind, field.wire_name
        ))
    };

    let (value, is_zero) = match field.field_type {
        FieldType::String => {
            let s = match raw {
                JsonValue::Null => String::new(),
                JsonValue::String(s) => s.clone(),
                JsonValue::Number(n) => n.to_string(),
                JsonValue::Bool(b) => b.to_string(),
                _ => return Err(unexpected()),
            };
            let is_zero = s.is_empty();
            (AttrValue::String(s), is_zero)
        }
        FieldType::Bool => {
            let b = match raw {
                JsonValue::Null => false,
                JsonValue::Bool(b) => *b,
                _ => return Err(unexpected()),
            };
            (AttrValue::Bool(b), !b)
        }
        FieldType::StringMap => {
            let map = match raw {
                JsonValue::Null => Default::default(),
                JsonValue::Object(m) => settings::normalize_json(m),
                _ => return Err(unexpected()),
            };
            let is_zero = map.is_empty();
            (AttrValue::Map(map), is_zero)
        }
    };

    if is_zero && field.presence == Presence::NullWhenZero {
        Ok(AttrValue::Null)
    } else {
        Ok(value)
    }
}
