//! Request forwarding to the upstream.
//!
//! One inbound request produces at most one upstream call. There are no
//! retries; a transport failure is answered with the `Proxy error` shape.
//! If the client goes away, axum drops the handler future and the pending
//! upstream call with it.

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_LENGTH, HeaderValue, Request, Uri},
    response::{IntoResponse, Response},
};

use crate::http::error::ProxyError;
use crate::http::headers::{forward_request_headers, relay_response_headers};
use crate::http::server::AppState;
use crate::routing::PathRewriter;

/// Main proxy handler.
/// Checks the prefix, rewrites the path and forwards the request.
/// Other paths go to the static web build if one is configured.
pub async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request.uri().path().to_string();
    if !state.matcher.matches(&path) {
        if let Some(files) = &state.static_files {
            return files.serve(request).await;
        }
        tracing::debug!(path = %path, "No route matched");
        return ProxyError::NotFound(path).into_response();
    }

    match forward(&state, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Proxy error");
            e.into_response()
        }
    }
}

async fn forward(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    let target = forward_target(&state.upstream_base, &state.rewriter, &parts.uri);
    let mut headers = forward_request_headers(&parts.headers);
    let body = axum::body::to_bytes(body, state.config.proxy.max_body_bytes)
        .await
        .map_err(ProxyError::Body)?;

    // hyper writes no length for an empty body.
    if body.is_empty() && parts.headers.contains_key(CONTENT_LENGTH) {
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
    }

    tracing::debug!(method = %parts.method, target = %target, "Forwarding upstream");

    let upstream = state
        .client
        .request(parts.method, target)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = relay_response_headers(upstream.headers());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Full upstream URL for an inbound URI: base + rewritten path + query.
pub fn forward_target(base: &str, rewriter: &PathRewriter, uri: &Uri) -> String {
    let path = rewriter.rewrite(uri.path());
    match uri.query() {
        Some(query) => format!("{}{}?{}", base, path, query),
        None => format!("{}{}", base, path),
    }
}
