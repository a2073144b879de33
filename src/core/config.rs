//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and an optional `.env` file) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Default Coin Railz API host.
pub const DEFAULT_BASE_URL: &str = "https://coinrailz.com";

/// Default timeout for upstream service calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Coin Railz credentials and base URL.
    pub credentials: Credentials,

    /// Behaviour of the upstream HTTP client.
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
}

/// Coin Railz credentials.
///
/// Set once at startup and never mutated afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Prepaid-credit API key sent as `X-API-KEY`.
    /// Buy credits at: https://coinrailz.com/credits
    pub api_key: Option<String>,

    /// Base URL of the Coin Railz API. Tool paths are appended to it.
    pub base_url: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Credentials {
    /// Whether an API key was configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Guidance shown at startup when no API key is configured.
    pub fn missing_key_warning(&self) -> Option<&'static str> {
        if self.has_api_key() {
            return None;
        }
        Some(
            "COINRAILZ_API_KEY not set - only free-tier services are available \
             (buy credits at https://coinrailz.com/credits)",
        )
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Upstream client behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Fetch a demo key with trial credits when a paid call is refused
    /// and no API key is configured.
    pub auto_demo_key: bool,

    /// Send anonymous usage telemetry.
    pub telemetry: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auto_demo_key: true,
            telemetry: true,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "coinrailz".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: Credentials::default(),
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
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(name) = var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_vars(&var);

        if let Some(api_key) = var("COINRAILZ_API_KEY") {
            config.credentials.api_key = Some(api_key.trim().to_string());
        }

        if let Some(base_url) = var("COINRAILZ_BASE_URL") {
            config.credentials.base_url = base_url;
        }

        if let Some(timeout) = var("COINRAILZ_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.upstream.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid COINRAILZ_TIMEOUT_SECS={:?}, using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        if let Some(flag) = var("COINRAILZ_AUTO_DEMO_KEY") {
            config.upstream.auto_demo_key = parse_flag(&flag, true);
        }

        if let Some(flag) = var("COINRAILZ_TELEMETRY") {
            config.upstream.telemetry = parse_flag(&flag, true);
        }

        config
    }

    /// Log the credential and upstream settings.
    ///
    /// Call once the tracing subscriber is installed.
    pub fn log_summary(&self) {
        match self.credentials.missing_key_warning() {
            None => info!("Coin Railz API key loaded from environment"),
            Some(warning) => warn!("{}", warning),
        }
        info!("Using Coin Railz base URL: {}", self.credentials.base());
        info!("Telemetry enabled: {}", self.upstream.telemetry);
    }
}

/// Parse a boolean-ish environment flag.
fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
