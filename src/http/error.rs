//! Error types for the HTTP layer.
//!
//! `ProxyError` is request-scoped and always becomes a JSON response of the
//! shape `{"error": ..., "details": ...}`. `ServerError` covers startup.

use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::http::cors::CorsError;

/// Failure while handling a single request.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Connect, DNS, TLS, timeout or protocol failure talking to upstream.
    #[error("{}", error_chain(.0))]
    Upstream(#[from] reqwest::Error),

    /// Inbound body over the configured limit or unreadable.
    #[error("{0}")]
    Body(axum::Error),

    #[error("no route for {0}")]
    NotFound(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ProxyError::Upstream(_) => "Proxy error",
            ProxyError::Body(_) => "Request body rejected",
            ProxyError::NotFound(_) => "Not found",
        }
    }
}

/// Wire shape of every synthesized error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub details: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.label(),
            details: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Render an error with all of its sources, e.g.
/// `error sending request: client error (Connect): dns error: ...`.
fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = inner.source();
    }
    out
}

/// Failure while building or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid CORS policy: {0}")]
    Cors(#[from] CorsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
