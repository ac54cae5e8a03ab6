//! Resource schema descriptors
//!
//! Declares, for every resource kind, which attributes exist, which are
//! client supplied (required or optional), which are assigned by the
//! server, and how zero values coming back from the API are mapped.
//!
//! # Overview
//!
//! - `ResourceKind` - The closed set of remotely managed entity types
//! - `ResourceSchema` - Collection path plus field descriptors for one kind
//! - `FieldDescriptor` - Name, wire name, role, type and presence policy

mod kinds;
mod types;

pub use kinds::schema_for;
pub use types::{FieldDescriptor, FieldRole, FieldType, Presence, ResourceKind, ResourceSchema};
