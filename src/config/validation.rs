//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check that paths and the upstream URL are well formed
//! - Check that the CORS policy can be built
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::ProxyConfig;
use crate::http::cors::CorsPolicy;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("upstream.base_url {url:?} is invalid: {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("{field} must start with '/', got {value:?}")]
    RelativePath { field: &'static str, value: String },

    #[error("proxy.prefix must not end with '/', got {0:?}")]
    TrailingSlash(String),

    #[error("health.path must be a literal path other than '/', got {0:?}")]
    HealthPath(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("cors: {0}")]
    Cors(String),
}

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(reason) = check_upstream(&config.upstream.base_url) {
        errors.push(ValidationError::UpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason,
        });
    }

    let prefix = &config.proxy.prefix;
    check_path(&mut errors, "proxy.prefix", prefix);
    if prefix.len() > 1 && prefix.ends_with('/') {
        errors.push(ValidationError::TrailingSlash(prefix.clone()));
    }

    let health = &config.health.path;
    check_path(&mut errors, "health.path", health);
    if health == "/" || !is_literal_route(health) {
        errors.push(ValidationError::HealthPath(health.clone()));
    }

    for rule in &config.proxy.rewrite {
        check_path(&mut errors, "proxy.rewrite.from", &rule.from);
        check_path(&mut errors, "proxy.rewrite.to", &rule.to);
    }

    if config.proxy.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("proxy.max_body_bytes"));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if let Err(e) = CorsPolicy::from_config(&config.cors) {
        errors.push(ValidationError::Cors(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream(base_url: &str) -> Result<(), String> {
    let url = Url::parse(base_url).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("must not carry a query or fragment".to_string());
    }
    Ok(())
}

/// axum rejects captures (`{id}`) and the legacy `:id` / `*rest` forms.
fn is_literal_route(path: &str) -> bool {
    !path.contains(['{', '}'])
        && !path
            .split('/')
            .any(|segment| segment.starts_with([':', '*']))
}

fn check_path(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if !value.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            field,
            value: value.to_string(),
        });
    }
}
