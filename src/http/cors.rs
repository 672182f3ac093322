//! CORS policy for browser clients.
//!
//! `CorsLayer` answers preflight requests and sets the allow-origin header.
//! It only emits the allowed methods and headers on preflight responses, so
//! both are also set on every response through `SetResponseHeaderLayer`.
//!
//! Do not combine a wildcard origin with credentials; `from_config` rejects it
//! because `CorsLayer` would panic at startup.

use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CorsConfig;

const WILDCARD: &str = "*";

/// Error building a CORS policy from configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorsError {
    #[error("invalid method {0:?}")]
    Method(String),

    #[error("invalid header name {0:?}")]
    Header(String),

    #[error("invalid origin {0:?}")]
    Origin(String),

    #[error("credentials cannot be allowed together with a wildcard origin")]
    CredentialsWithWildcard,
}

/// Parsed, ready-to-apply CORS policy.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// `None` allows any origin.
    origins: Option<Vec<HeaderValue>>,
    methods: Vec<Method>,
    headers: Vec<HeaderName>,
    allow_credentials: bool,
    max_age: Option<Duration>,
    methods_value: HeaderValue,
    headers_value: HeaderValue,
}

impl CorsPolicy {
    pub fn from_config(config: &CorsConfig) -> Result<Self, CorsError> {
        let origins = if config.allowed_origins.iter().any(|o| o == WILDCARD) {
            if config.allow_credentials {
                return Err(CorsError::CredentialsWithWildcard);
            }
            None
        } else {
            let list = config
                .allowed_origins
                .iter()
                .map(|o| HeaderValue::from_str(o).map_err(|_| CorsError::Origin(o.clone())))
                .collect::<Result<Vec<_>, _>>()?;
            Some(list)
        };

        let methods = config
            .allowed_methods
            .iter()
            .map(|m| Method::from_bytes(m.as_bytes()).map_err(|_| CorsError::Method(m.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let headers = config
            .allowed_headers
            .iter()
            .map(|h| HeaderName::from_bytes(h.as_bytes()).map_err(|_| CorsError::Header(h.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        // Values as written in config, so `Content-Type` keeps its casing.
        let methods_value = list_value(&config.allowed_methods)
            .ok_or_else(|| CorsError::Method(config.allowed_methods.join(", ")))?;
        let headers_value = list_value(&config.allowed_headers)
            .ok_or_else(|| CorsError::Header(config.allowed_headers.join(", ")))?;

        Ok(Self {
            origins,
            methods,
            headers,
            allow_credentials: config.allow_credentials,
            max_age: config.max_age_secs.map(Duration::from_secs),
            methods_value,
            headers_value,
        })
    }

    /// Value sent in `Access-Control-Allow-Methods`.
    pub fn allow_methods_value(&self) -> &HeaderValue {
        &self.methods_value
    }

    /// Value sent in `Access-Control-Allow-Headers`.
    pub fn allow_headers_value(&self) -> &HeaderValue {
        &self.headers_value
    }

    /// Build the preflight/allow-origin layer.
    pub fn layer(&self) -> CorsLayer {
        let origin = match &self.origins {
            None => AllowOrigin::any(),
            Some(list) => AllowOrigin::list(list.clone()),
        };

        let layer = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(self.methods.clone())
            .allow_headers(self.headers.clone())
            .allow_credentials(self.allow_credentials);

        match self.max_age {
            Some(max_age) => layer.max_age(max_age),
            None => layer,
        }
    }

    /// Apply the policy to the given Router.
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router
            .layer(self.layer())
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                self.methods_value.clone(),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                self.headers_value.clone(),
            ))
    }
}

fn list_value(items: &[String]) -> Option<HeaderValue> {
    HeaderValue::from_str(&items.join(", ")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = CorsPolicy::from_config(&CorsConfig::default()).unwrap();
        assert!(policy.origins.is_none());
        assert_eq!(policy.methods.len(), 5);
        assert_eq!(policy.allow_methods_value(), "GET, POST, PUT, DELETE, OPTIONS");
        assert_eq!(
            policy.allow_headers_value(),
            "Content-Type, Authorization, X-Requested-With"
        );
        assert_eq!(policy.max_age, Some(Duration::from_secs(86_400)));
    }

    #[test]
    fn test_origin_list() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".into()],
            allow_credentials: true,
            ..CorsConfig::default()
        };
        let policy = CorsPolicy::from_config(&config).unwrap();
        assert_eq!(policy.origins.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_rejects_bad_entries() {
        let config = CorsConfig {
            allowed_methods: vec!["GET".into(), "NOT A METHOD".into()],
            ..CorsConfig::default()
        };
        assert_eq!(
            CorsPolicy::from_config(&config).unwrap_err(),
            CorsError::Method("NOT A METHOD".into())
        );

        let config = CorsConfig {
            allowed_headers: vec!["X Bad".into()],
            ..CorsConfig::default()
        };
        assert!(matches!(
            CorsPolicy::from_config(&config),
            Err(CorsError::Header(_))
        ));
    }

    #[test]
    fn test_credentials_with_wildcard() {
        let config = CorsConfig {
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert_eq!(
            CorsPolicy::from_config(&config).unwrap_err(),
            CorsError::CredentialsWithWildcard
        );
    }
}
