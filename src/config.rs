//! Client configuration shared by every gateway
//!
//! A `ClientConfig` is resolved once (explicit values first, then the
//! `MAKE_API_TOKEN` / `MAKE_BASE_URL` environment variables, then the
//! default endpoint) and is immutable afterwards.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use std::collections::HashMap;
use std::fmt;

/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "MAKE_API_TOKEN";

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "MAKE_BASE_URL";

/// Endpoint used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://api.make.com/";

/// Immutable configuration for talking to the Make API
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL all collection paths are resolved against
    pub base_url: String,
    /// API token sent in the `Authorization` header
    pub api_token: String,
    /// User agent string
    pub user_agent: String,
    /// Extra headers for every request
    pub default_headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Create a config with the default endpoint
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: api_token.into(),
            user_agent: format!("make-provider/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Resolve configuration from the environment only
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    /// Resolve configuration, with explicit values taking precedence over
    /// the environment
    pub fn resolve(api_token: Option<String>, base_url: Option<String>) -> Result<Self> {
        let api_token = api_token
            .or_else(|| std::env::var(ENV_API_TOKEN).ok())
            .none_if_empty();
        let base_url = base_url
            .or_else(|| std::env::var(ENV_BASE_URL).ok())
            .none_if_empty();

        let mut builder = Self::builder();
        if let Some(token) = api_token {
            builder = builder.api_token(token);
        }
        if let Some(url) = base_url {
            builder = builder.base_url(url);
        }
        builder.build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("default_headers", &self.default_headers.keys())
            .finish()
    }
}

/// Builder for client config
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    api_token: Option<String>,
    user_agent: Option<String>,
    default_headers: HashMap<String, String>,
}

impl ClientConfigBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API token
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Build the config, rejecting a missing token
    pub fn build(self) -> Result<ClientConfig> {
        let Some(api_token) = self.api_token.none_if_empty() else {
            return Err(Error::config(format!(
                "API token not found in the {ENV_API_TOKEN} environment variable \
                 or the provider configuration"
            )));
        };

        let mut config = ClientConfig::new(api_token);
        if let Some(url) = self.base_url.none_if_empty() {
            config.base_url = url;
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }
        config.default_headers = self.default_headers;
        Ok(config)
    }
}
