//! Local and remote record representations
//!
//! A `LocalRecord` is what the orchestrator persists: every attribute is
//! tagged null, unknown or known. A `RemoteRecord` is the wire body the API
//! returned, still using the service's zero-value conventions. The mapping
//! module converts between the two according to the schema descriptors.

mod mapping;
mod types;

pub use mapping::{request_body, validate_desired};
pub use types::{AttrValue, LocalRecord, RemoteRecord};
