//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → config file (TOML, optional)  loader.rs
//!     → environment (PORT, UPSTREAM_URL, WEB_DIR)
//!     → command-line flags
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, CliOverrides, ConfigError};
pub use schema::{
    CorsConfig, HealthConfig, ListenerConfig, ProxyConfig, ProxyRouteConfig, RewriteRule,
    StaticConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
