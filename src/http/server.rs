//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, tracing, request ID, request log)
//! - Build the upstream client with its timeouts
//! - Bind server to listener and shut down on signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::health::health_handler;
use crate::http::cors::CorsPolicy;
use crate::http::error::ServerError;
use crate::http::proxy::proxy_handler;
use crate::http::static_files::StaticFiles;
use crate::observability::logging::log_request;
use crate::routing::{PathPrefixMatcher, PathRewriter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub client: reqwest::Client,
    pub matcher: Arc<PathPrefixMatcher>,
    pub rewriter: Arc<PathRewriter>,
    /// Upstream base URL without a trailing slash.
    pub upstream_base: Arc<str>,
    /// Web build answering paths outside the prefix, when configured.
    pub static_files: Option<StaticFiles>,
}

impl AppState {
    pub fn new(config: Arc<ProxyConfig>) -> Result<Self, reqwest::Error> {
        let client = build_client(&config)?;
        let matcher = Arc::new(PathPrefixMatcher::new(config.proxy.prefix.clone()));
        let rewriter = Arc::new(PathRewriter::new(config.proxy.rewrite.clone()));
        let upstream_base = Arc::from(config.upstream.base_url.trim_end_matches('/'));
        let static_files = config.static_files.dir.as_deref().map(StaticFiles::new);

        Ok(Self {
            config,
            client,
            matcher,
            rewriter,
            upstream_base,
            static_files,
        })
    }
}

/// Upstream client. Redirects are relayed to the caller, not followed, and
/// proxy environment variables are ignored.
fn build_client(config: &ProxyConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
        .timeout(Duration::from_secs(config.timeouts.request_secs))
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let config = Arc::new(config);
        let cors = CorsPolicy::from_config(&config.cors)?;
        let state = AppState::new(config.clone())?;

        let router = Self::build_router(&config, &cors, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Outermost first: request id, trace, request log, CORS, handlers.
    /// CORS sits outside the routes so 404/405 responses carry it too, and
    /// preflights never reach a handler.
    fn build_router(config: &ProxyConfig, cors: &CorsPolicy, state: AppState) -> Router {
        let routes = Router::new()
            .route(&config.health.path, get(health_handler))
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state);

        let stack = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(middleware::from_fn(log_request));

        cors.apply(routes).layer(stack)
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
