//! Schema types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Remotely managed entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Scenario,
    Connection,
    Webhook,
    Team,
    Organization,
    DataStore,
}

impl ResourceKind {
    /// Every resource kind, in declaration order
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Scenario,
        ResourceKind::Connection,
        ResourceKind::Webhook,
        ResourceKind::Team,
        ResourceKind::Organization,
        ResourceKind::DataStore,
    ];

    /// Snake-case identifier (`data_store`)
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Scenario => "scenario",
            ResourceKind::Connection => "connection",
            ResourceKind::Webhook => "webhook",
            ResourceKind::Team => "team",
            ResourceKind::Organization => "organization",
            ResourceKind::DataStore => "data_store",
        }
    }

    /// Name the orchestrator knows this kind by (`make_data_store`)
    pub fn type_name(self) -> String {
        format!("make_{}", self.as_str())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::DataStore => f.write_str("data store"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s
            .trim()
            .trim_start_matches("make_")
            .replace('-', "_")
            .to_ascii_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::config(format!("Unknown resource kind: {s}")))
    }
}

/// Who supplies a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Must be present in every create/update request
    Required,
    /// May be omitted by the caller
    Optional,
    /// Assigned by the server, never sent
    Computed,
}

/// Value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Bool,
    /// String-keyed, string-valued settings map
    StringMap,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::StringMap => write!(f, "map of string"),
        }
    }
}

/// How a remote zero value is represented locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Zero value stays a known zero value (`""`, `false`)
    Plain,
    /// Zero value (`""`, empty map, missing) becomes null
    NullWhenZero,
}

/// Descriptor for a single attribute of a resource kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Attribute name in the local record
    pub name: &'static str,
    /// Key used in API request and response bodies
    pub wire_name: &'static str,
    pub role: FieldRole,
    pub field_type: FieldType,
    pub presence: Presence,
}

impl FieldDescriptor {
    /// Client-supplied attribute that must always be set
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            wire_name: name,
            role: FieldRole::Required,
            field_type,
            presence: Presence::Plain,
        }
    }

    /// Client-supplied attribute that may be left unset
    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            wire_name: name,
            role: FieldRole::Optional,
            field_type,
            presence: Presence::Plain,
        }
    }

    /// Server-assigned attribute
    pub const fn computed(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            wire_name: name,
            role: FieldRole::Computed,
            field_type,
            presence: Presence::Plain,
        }
    }

    /// Use a different key on the wire
    #[must_use]
    pub const fn wire(mut self, wire_name: &'static str) -> Self {
        self.wire_name = wire_name;
        self
    }

    /// Map remote zero values to null
    #[must_use]
    pub const fn null_when_zero(mut self) -> Self {
        self.presence = Presence::NullWhenZero;
        self
    }

    /// Check if this attribute is supplied by the client
    pub fn is_client_supplied(&self) -> bool {
        self.role != FieldRole::Computed
    }
}

/// Field set and API location for one resource kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    pub kind: ResourceKind,
    /// Collection path relative to the base URL (`v2/scenarios`)
    pub collection: &'static str,
    /// Attributes other than the identifier
    pub fields: &'static [FieldDescriptor],
}

impl ResourceSchema {
    /// Path of a single member of the collection
    pub fn member_path(&self, id: &str) -> Result<String> {
        self.check_identifier(id)?;
        Ok(format!("{}/{}", self.collection, id))
    }

    /// Reject identifiers that would not stay a single path segment
    ///
    /// URL joining treats `\` as `/` and decodes percent escapes, so both
    /// are refused along with separators, dot segments and control characters.
    pub fn check_identifier(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::invalid_field(self.kind, "id", "identifier is empty"));
        }
        let escapes = id == "."
            || id == ".."
            || id
                .chars()
                .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control());
        if escapes {
            return Err(Error::invalid_field(
                self.kind,
                "id",
                format!("'{}' is not a valid identifier", id.escape_debug()),
            ));
        }
        Ok(())
    }

    /// Look up a field by its local name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields with the given role
    pub fn fields_with_role(&self, role: FieldRole) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |f| f.role == role)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields_with_role(FieldRole::Required)
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields_with_role(FieldRole::Optional)
    }

    pub fn computed_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields_with_role(FieldRole::Computed)
    }
}
