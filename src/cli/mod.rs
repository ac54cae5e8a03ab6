//! CLI module
//!
//! Command-line interface for driving one reconciliation operation.
//!
//! # Commands
//!
//! - `create` - Create a resource from a record file
//! - `read` - Refresh a resource by identifier
//! - `update` - Push a record file to an existing resource
//! - `delete` - Delete a resource
//! - `import` - Adopt an existing resource
//! - `lookup` - Read-only fetch by identifier
//! - `schema` - Print a kind's attribute descriptor

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
