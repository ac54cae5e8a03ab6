//! HTTP transport module
//!
//! Sends authenticated JSON requests to the Make API and hands back the raw
//! status and body. Interpreting the status is left to the gateways.
//!
//! # Features
//!
//! - **Transport trait**: The minimal send capability gateways depend on
//! - **Token Authentication**: `Authorization: Token <token>` on every call
//! - **JSON Bodies**: Requests and accepted responses are `application/json`
//! - **Error Messages**: Extraction of a readable message from error payloads

mod client;

pub use client::{extract_error_message, ApiRequest, HttpTransport, RawResponse, Transport};

#[cfg(test)]
mod tests;
