//! Configuration loading from disk and the environment.
//!
//! Layers are applied in order, later wins:
//! defaults → TOML file → environment → command line.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the listen port.
pub const ENV_PORT: &str = "PORT";

/// Environment variable holding the upstream base URL.
pub const ENV_UPSTREAM_URL: &str = "UPSTREAM_URL";

/// Environment variable holding the static web directory.
pub const ENV_WEB_DIR: &str = "WEB_DIR";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value:?}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub upstream: Option<String>,
}

/// Parse a TOML document into a configuration, without validating it.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply environment overrides using the given lookup.
///
/// Taking the lookup as a closure keeps this testable without touching the
/// process environment.
pub fn apply_env<F>(config: &mut ProxyConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
        config.listener.port = value.trim().parse().map_err(|_| ConfigError::Env {
            name: ENV_PORT,
            value: value.clone(),
        })?;
    }

    if let Some(value) = lookup(ENV_UPSTREAM_URL).filter(|v| !v.is_empty()) {
        config.upstream.base_url = value;
    }

    if let Some(value) = lookup(ENV_WEB_DIR).filter(|v| !v.is_empty()) {
        config.static_files.dir = Some(value.into());
    }

    Ok(())
}

/// Apply command-line overrides.
pub fn apply_cli(config: &mut ProxyConfig, cli: &CliOverrides) {
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(upstream) = &cli.upstream {
        config.upstream.base_url = upstream.clone();
    }
}

/// Build the effective configuration: optional file, process environment,
/// command-line flags, then validation.
pub fn load_config(path: Option<&Path>, cli: &CliOverrides) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ProxyConfig::default(),
    };

    apply_env(&mut config, |name| std::env::var(name).ok())?;
    apply_cli(&mut config, cli);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
