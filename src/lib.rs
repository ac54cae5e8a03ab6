//! # Make Provider
//!
//! Reconciliation layer that keeps Make.com resources in line with locally
//! declared records.
//!
//! ## Features
//!
//! - **Six Resource Kinds**: Scenario, Connection, Webhook, Team, Organization, DataStore
//! - **One Generic Gateway**: every kind driven by a static schema descriptor
//! - **Lifecycle Engine**: create, read, update, delete, import and lookup
//! - **Null-Normalization**: zero-valued remote fields become null locally
//! - **Cancellation**: every request honours a `CancellationToken`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use make_provider::{ClientConfig, LocalRecord, MakeClient, ResourceKind, Result};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = MakeClient::new(&ClientConfig::from_env()?)?;
//!     let teams = client.reconciler(ResourceKind::Team);
//!     let cancel = CancellationToken::new();
//!
//!     let desired = LocalRecord::new(ResourceKind::Team).with("name", "Ops");
//!     let created = teams.create(&cancel, &desired).await?;
//!     let refreshed = teams.read(&cancel, &created).await?;
//!     teams.delete(&cancel, &created).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Reconciler                             │
//! │  create  read  update  delete  import  lookup                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────┬──────────────────────────┐
//! │    Record    │        Gateway        │        Transport         │
//! ├──────────────┼───────────────────────┼──────────────────────────┤
//! │ LocalRecord  │ POST/GET/PUT/DELETE   │ HttpTransport (reqwest)  │
//! │ RemoteRecord │ 404 classification    │ Token auth, JSON         │
//! │ Settings     │ Schema descriptors    │ Cancellation             │
//! └──────────────┴───────────────────────┴──────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the provider
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP transport
pub mod http;

/// Resource kinds and their field descriptors
pub mod schema;

/// Settings map normalization
pub mod settings;

/// Local and remote record representations
pub mod record;

/// Per-kind REST gateways
pub mod gateway;

/// Reconciliation engine
pub mod engine;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ClientConfig;
pub use engine::{LifecycleState, ReadOutcome, Reconciler};
pub use gateway::{DeleteResult, Gateway, MakeClient};
pub use record::{AttrValue, LocalRecord, RemoteRecord};
pub use schema::{schema_for, ResourceKind, ResourceSchema};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
