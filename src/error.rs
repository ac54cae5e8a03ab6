//! Error types for the Make provider
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::schema::ResourceKind;
use crate::types::Operation;
use thiserror::Error;

/// The main error type for the Make provider
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Missing required attribute '{field}' for {kind}")]
    MissingField { kind: ResourceKind, field: String },

    #[error("Invalid value for {kind} attribute '{field}': {message}")]
    InvalidField {
        kind: ResourceKind,
        field: String,
        message: String,
    },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Failed to perform request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Failed to encode request body: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Request cancelled")]
    Cancelled,

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: ResourceKind, id: String },

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Remote returned identifier '{actual}' for {kind} '{expected}'")]
    IdentifierChanged {
        kind: ResourceKind,
        expected: String,
        actual: String,
    },

    // ============================================================================
    // Annotated Errors
    // ============================================================================
    #[error("Unable to {op} {kind}: {source}")]
    Operation {
        op: Operation,
        kind: ResourceKind,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(kind: ResourceKind, field: impl Into<String>) -> Self {
        Self::MissingField {
            kind,
            field: field.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(
        kind: ResourceKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Annotate an error with the operation and resource kind it came from
    pub fn during(self, op: Operation, kind: ResourceKind) -> Self {
        Self::Operation {
            op,
            kind,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through operation annotations
    pub fn root(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if the remote reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Error::NotFound { .. })
    }

    /// Check if the caller cancelled the request
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), Error::Cancelled)
    }

    /// Check if the caller supplied an invalid desired record
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.root(),
            Error::Configuration { .. } | Error::MissingField { .. } | Error::InvalidField { .. }
        )
    }

    /// Check if the request could not be sent or its response not read
    pub fn is_transport(&self) -> bool {
        matches!(
            self.root(),
            Error::Http(_)
                | Error::InvalidUrl(_)
                | Error::Transport { .. }
                | Error::Serialize(_)
                | Error::Decode { .. }
        )
    }

    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Error::Api { status, .. } => Some(*status),
            Error::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Result type alias for the Make provider
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field(ResourceKind::Scenario, "name");
        assert_eq!(
            err.to_string(),
            "Missing required attribute 'name' for scenario"
        );

        let err = Error::api(500, "bad");
        assert_eq!(err.to_string(), "API request failed with status 500: bad");

        let err = Error::not_found(ResourceKind::DataStore, "ds-1");
        assert_eq!(err.to_string(), "data store with ID ds-1 not found");
    }

    #[test]
    fn test_operation_annotation() {
        let err = Error::api(500, "bad").during(Operation::Create, ResourceKind::Webhook);
        assert_eq!(
            err.to_string(),
            "Unable to create webhook: API request failed with status 500: bad"
        );
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_classification_looks_through_annotations() {
        let err = Error::not_found(ResourceKind::Team, "t-1").during(Operation::Update, ResourceKind::Team);
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));

        let err = Error::Cancelled.during(Operation::Read, ResourceKind::Team);
        assert!(err.is_cancelled());
        assert!(!err.is_transport());

        let err = Error::transport("connection refused");
        assert!(err.is_transport());
        assert!(err.status().is_none());

        let err = Error::missing_field(ResourceKind::Connection, "app_name")
            .during(Operation::Create, ResourceKind::Connection);
        assert!(err.is_configuration());
    }
}
