//! Field sets for every resource kind

use super::types::{FieldDescriptor, FieldType, ResourceKind, ResourceSchema};

const SCENARIO_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("name", FieldType::String),
    FieldDescriptor::optional("description", FieldType::String).null_when_zero(),
    FieldDescriptor::optional("active", FieldType::Bool).wire("is_active"),
    FieldDescriptor::optional("team_id", FieldType::String).null_when_zero(),
];

const CONNECTION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("name", FieldType::String),
    FieldDescriptor::required("app_name", FieldType::String),
    FieldDescriptor::optional("team_id", FieldType::String).null_when_zero(),
    FieldDescriptor::optional("settings", FieldType::StringMap).null_when_zero(),
    FieldDescriptor::computed("verified", FieldType::Bool),
];

const WEBHOOK_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("name", FieldType::String),
    FieldDescriptor::computed("url", FieldType::String),
    FieldDescriptor::optional("team_id", FieldType::String).null_when_zero(),
    FieldDescriptor::optional("active", FieldType::Bool),
    FieldDescriptor::optional("settings", FieldType::StringMap).null_when_zero(),
];

const TEAM_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("name", FieldType::String),
    FieldDescriptor::optional("organization_id", FieldType::String).null_when_zero(),
];

const ORGANIZATION_FIELDS: &[FieldDescriptor] =
    &[FieldDescriptor::required("name", FieldType::String)];

const DATA_STORE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("name", FieldType::String),
    FieldDescriptor::optional("description", FieldType::String).null_when_zero(),
    FieldDescriptor::optional("team_id", FieldType::String).null_when_zero(),
];

static SCENARIO: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Scenario,
    collection: "v2/scenarios",
    fields: SCENARIO_FIELDS,
};

static CONNECTION: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Connection,
    collection: "v2/connections",
    fields: CONNECTION_FIELDS,
};

static WEBHOOK: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Webhook,
    collection: "v2/webhooks",
    fields: WEBHOOK_FIELDS,
};

static TEAM: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Team,
    collection: "v2/teams",
    fields: TEAM_FIELDS,
};

static ORGANIZATION: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Organization,
    collection: "v2/organizations",
    fields: ORGANIZATION_FIELDS,
};

static DATA_STORE: ResourceSchema = ResourceSchema {
    kind: ResourceKind::DataStore,
    collection: "v2/data-stores",
    fields: DATA_STORE_FIELDS,
};

/// Schema descriptor for a resource kind
pub fn schema_for(kind: ResourceKind) -> &'static ResourceSchema {
    match kind {
        ResourceKind::Scenario => &SCENARIO,
        ResourceKind::Connection => &CONNECTION,
        ResourceKind::Webhook => &WEBHOOK,
        ResourceKind::Team => &TEAM,
        ResourceKind::Organization => &ORGANIZATION,
        ResourceKind::DataStore => &DATA_STORE,
    }
}
