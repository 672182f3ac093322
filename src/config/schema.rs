//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Upstream origin used when nothing else is configured.
pub const DEFAULT_UPSTREAM: &str = "https://goldfish-app-3lf7u.ondigitalocean.app";

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// The single backend every proxied request goes to.
    pub upstream: UpstreamConfig,

    /// Which paths are proxied and how they are rewritten.
    pub proxy: ProxyRouteConfig,

    /// Cross-origin headers attached to every response.
    pub cors: CorsConfig,

    /// Liveness endpoint settings.
    pub health: HealthConfig,

    /// Timeouts applied to upstream calls.
    pub timeouts: TimeoutConfig,

    /// Web build served for paths outside the proxied prefix.
    #[serde(rename = "static")]
    pub static_files: StaticConfig,
}

impl ProxyConfig {
    /// Address string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Listen port. Overridden by the `PORT` environment variable.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Upstream origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL requests are forwarded to (scheme, host, optional port).
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM.to_string(),
        }
    }
}

/// Proxied path configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProxyRouteConfig {
    /// Path prefix whose requests are forwarded upstream.
    pub prefix: String,

    /// Ordered rewrite rules, first match wins.
    pub rewrite: Vec<RewriteRule>,

    /// Largest inbound body buffered for forwarding.
    pub max_body_bytes: usize,
}

impl Default for ProxyRouteConfig {
    fn default() -> Self {
        Self {
            prefix: "/api".to_string(),
            rewrite: vec![RewriteRule {
                from: "/api".to_string(),
                to: "/api".to_string(),
            }],
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// A single prefix rewrite: paths starting with `from` get `from` replaced by `to`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. `["*"]` allows any origin.
    pub allowed_origins: Vec<String>,

    pub allowed_methods: Vec<String>,

    pub allowed_headers: Vec<String>,

    /// Emit `Access-Control-Allow-Credentials: true`. Not valid with `*`.
    pub allow_credentials: bool,

    /// Preflight cache lifetime advertised to browsers.
    pub max_age_secs: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_headers: ["Content-Type", "Authorization", "X-Requested-With"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            allow_credentials: false,
            max_age_secs: Some(86_400),
        }
    }
}

/// Liveness endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HealthConfig {
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
        }
    }
}

/// Static file serving. Unset means other paths answer 404.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory holding `index.html` and the built assets.
    pub dir: Option<PathBuf>,
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 30,
        }
    }
}
