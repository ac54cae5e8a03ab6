//! HTTP transport for the Make API
//!
//! Provides the `Transport` seam plus its reqwest implementation:
//! - Base URL joining for relative collection paths
//! - Authorization and content-type headers
//! - Full body read before returning (the response is released)

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A request relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL (`v2/scenarios/42`)
    pub path: String,
    /// JSON body, if any
    pub body: Option<JsonValue>,
}

impl ApiRequest {
    /// Create a request without a body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: JsonValue) -> Self {
        Self::new(Method::POST, path).json(body)
    }

    pub fn put(path: impl Into<String>, body: JsonValue) -> Self {
        Self::new(Method::PUT, path).json(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw status and body as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Minimal HTTP capability the gateways depend on
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw status and body
    ///
    /// Fails only when the request could not be sent or the response could
    /// not be read; HTTP error statuses are returned as responses.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    headers: HeaderMap,
}

impl HttpTransport {
    /// Create a transport from a client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;
        Self::with_client(config, client)
    }

    /// Create a transport reusing an existing reqwest client
    pub fn with_client(config: &ClientConfig, client: Client) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::transport(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }
        // Joining relative paths only keeps the base path with a trailing slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        for (key, value) in &config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::transport(format!("invalid header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::transport(format!("invalid value for header '{key}': {e}")))?;
            headers.insert(name, value);
        }
        let mut token = HeaderValue::from_str(&format!("Token {}", config.api_token))
            .map_err(|_| Error::transport("API token contains invalid header characters"))?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        Ok(Self {
            client,
            base_url,
            headers,
        })
    }

    /// Base URL relative paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL from a relative path
    pub fn build_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = self.build_url(&request.path)?;

        let mut req = self
            .client
            .request(request.method.into(), url.clone())
            .headers(self.headers.clone());

        if let Some(ref body) = request.body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        // text() consumes the response, releasing the connection
        let body = response.text().await?;

        debug!("{} {} -> {}", request.method, url.path(), status);
        Ok(RawResponse { status, body })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Error payload returned by the API on failure
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Human-readable message for an error response body
///
/// Prefers `message`, then `error`; falls back to the raw body when it is
/// not a structured payload or both fields are empty.
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| {
            parsed
                .message
                .filter(|m| !m.is_empty())
                .or_else(|| parsed.error.filter(|e| !e.is_empty()))
        })
        .unwrap_or_else(|| body.to_string())
}
