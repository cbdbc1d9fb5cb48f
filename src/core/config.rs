//! Configuration management for the MCP server.
//!
//! Configuration is read once at startup (environment plus an optional `.env`
//! file) and then shared read-only behind an `Arc`. Tool handlers receive the
//! pieces they need when the registry is built and never read the
//! environment themselves.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default base URL of the customer directory.
pub const DEFAULT_CUSTOMERS_BASE_URL: &str = "https://dummyjson.com";

/// Default upstream request timeout, in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream HTTP services queried by the tools.
    pub upstream: UpstreamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Upstream services configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Customer directory, authenticated with a bearer token.
    pub customers: ProviderConfig,

    /// Subscription and device service, authenticated with a `token` header.
    pub fleet: ProviderConfig,

    /// Per-request timeout applied by the shared HTTP client.
    pub timeout_secs: u64,

    /// Raw `MCP_UPSTREAM_TIMEOUT_SECS` value that failed to parse.
    #[serde(skip)]
    rejected_timeout: Option<String>,
}

/// Base URL and static credential of one upstream provider.
///
/// Missing values are empty strings: calls then fail against the upstream
/// rather than at startup.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(skip_serializing, default)]
    pub credential: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field(
                "credential",
                &if self.credential.is_empty() {
                    ""
                } else {
                    "[REDACTED]"
                },
            )
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credential: credential.into(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            customers: ProviderConfig::new(DEFAULT_CUSTOMERS_BASE_URL, ""),
            fleet: ProviderConfig::default(),
            timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            rejected_timeout: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "myapi-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). Upstream settings keep the
    /// names the providers document: `MYAPI_BASE_URL`, `MYAPI_KEY`,
    /// `URL_BASE` and `TOKEN`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = !matches!(timestamps.as_str(), "0" | "false");
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.upstream = UpstreamConfig::from_env();

        config
    }
}

impl UpstreamConfig {
    /// Load upstream configuration from environment variables.
    pub fn from_env() -> Self {
        let mut upstream = Self::default();

        if let Ok(base_url) = std::env::var("MYAPI_BASE_URL") {
            upstream.customers.base_url = base_url;
        }
        upstream.customers.credential = std::env::var("MYAPI_KEY").unwrap_or_default();

        upstream.fleet.base_url = std::env::var("URL_BASE").unwrap_or_default();
        upstream.fleet.credential = std::env::var("TOKEN").unwrap_or_default();

        if let Ok(timeout) = std::env::var("MCP_UPSTREAM_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) if secs > 0 => upstream.timeout_secs = secs,
                _ => upstream.rejected_timeout = Some(timeout),
            }
        }

        upstream
    }

    /// Problems worth reporting once logging is up. Loading runs before the
    /// subscriber is installed, so nothing is logged there.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(raw) = &self.rejected_timeout {
            warnings.push(format!(
                "Ignoring invalid MCP_UPSTREAM_TIMEOUT_SECS={raw:?}, using {}s",
                self.timeout_secs
            ));
        }
        if self.customers.credential.is_empty() {
            warnings.push(
                "MYAPI_KEY not set - customer tools will send an empty bearer token".to_string(),
            );
        }
        if self.fleet.base_url.is_empty() {
            warnings.push("URL_BASE not set - subscriber and device tools will fail".to_string());
        }
        warnings
    }

    /// Log the upstream setup and any [`warnings`](Self::warnings).
    pub fn log_startup(&self) {
        for warning in self.warnings() {
            warn!("{}", warning);
        }
        info!("Customer directory: {}", self.customers.base_url);
        if !self.fleet.base_url.is_empty() {
            info!("Subscriber service: {}", self.fleet.base_url);
        }
    }
}
