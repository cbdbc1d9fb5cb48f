//! HTTP client for the upstream providers.
//!
//! Every tool call is exactly one GET through [`UpstreamClient::get_json`]:
//! no retries, no caching. The static credential is attached as a header
//! and never appears in URLs, logs or error messages.

use std::time::Duration;

use reqwest::{
    Client, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderName},
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::ToolError;
use crate::core::config::ProviderConfig;

/// How a provider expects its static credential.
#[derive(Clone)]
pub enum Credential {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// A custom header carrying the raw token, e.g. `token: <token>`.
    Header { name: HeaderName, value: String },
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer([REDACTED])"),
            Self::Header { name, .. } => write!(f, "Header({name}: [REDACTED])"),
        }
    }
}

/// A GET request relative to a provider's base URL.
#[derive(Debug, Clone, Default)]
pub struct UpstreamRequest {
    segments: Vec<String>,
    query: Vec<(String, String)>,
    accept_json: bool,
}

impl UpstreamRequest {
    /// Start a request for the given path segments (percent-encoded on build).
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Send `accept: application/json`.
    pub fn accept_json(mut self) -> Self {
        self.accept_json = true;
        self
    }
}

/// Client bound to one provider: base URL plus credential.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    credential: Credential,
}

impl UpstreamClient {
    pub fn new(http: Client, base_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            credential,
        }
    }

    /// Client for a bearer-token provider.
    pub fn bearer(http: Client, provider: &ProviderConfig) -> Self {
        Self::new(
            http,
            provider.base_url.clone(),
            Credential::Bearer(provider.credential.clone()),
        )
    }

    /// Client for a provider taking its token in a custom header.
    pub fn with_header(http: Client, provider: &ProviderConfig, header: &'static str) -> Self {
        Self::new(
            http,
            provider.base_url.clone(),
            Credential::Header {
                name: HeaderName::from_static(header),
                value: provider.credential.clone(),
            },
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute URL for a request.
    pub fn url(&self, tool: &str, request: &UpstreamRequest) -> Result<Url, ToolError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ToolError::Transport {
            tool: tool.to_string(),
            message: format!("invalid upstream base URL '{}': {e}", self.base_url),
        })?;

        if !request.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| ToolError::Transport {
                    tool: tool.to_string(),
                    message: format!("upstream base URL '{}' cannot take a path", self.base_url),
                })?
                .pop_if_empty()
                .extend(&request.segments);
        }

        if !request.query.is_empty() {
            let query = serde_urlencoded::to_string(&request.query)
                .map_err(|e| ToolError::internal(format!("{tool}: failed to encode query: {e}")))?;
            url.set_query(Some(&query));
        }

        Ok(url)
    }

    /// Issue the GET and parse the body as JSON.
    ///
    /// A non-success status fails with [`ToolError::Upstream`] without
    /// reading the body.
    #[instrument(skip(self, request), fields(base = %self.base_url))]
    pub async fn get_json(&self, tool: &str, request: UpstreamRequest) -> Result<Value, ToolError> {
        let url = self.url(tool, &request)?;
        debug!("GET {}", url.path());

        let mut builder = self.http.get(url);
        builder = match &self.credential {
            Credential::Bearer(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            Credential::Header { name, value } => builder.header(name.clone(), value.as_str()),
        };
        if request.accept_json {
            builder = builder.header(ACCEPT, "application/json");
        }

        let response = builder.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else {
                e.without_url().to_string()
            };
            warn!("Upstream request failed: {}", message);
            ToolError::Transport {
                tool: tool.to_string(),
                message,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned HTTP {}", status.as_u16());
            return Err(ToolError::Upstream {
                tool: tool.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| ToolError::Transport {
            tool: tool.to_string(),
            message: e.without_url().to_string(),
        })?;

        debug!("Upstream response received: {} bytes", bytes.len());

        serde_json::from_slice(&bytes)
            .map_err(|e| ToolError::malformed(tool, format!("invalid JSON: {e}")))
    }
}

/// Build the HTTP client shared by all providers.
pub fn build_http_client(timeout: Duration) -> Result<Client, ToolError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ToolError::internal(format!("failed to build HTTP client: {e}")))
}
