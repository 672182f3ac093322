//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the server from a validated configuration
//! - Bind the listener and announce the port and upstream
//! - Serve until a shutdown signal arrives

use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::signals::spawn_signal_handler;
use crate::lifecycle::Shutdown;

/// Run the proxy with the given configuration until shutdown.
pub async fn start(config: ProxyConfig) -> Result<(), ServerError> {
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(server.config().bind_address()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("CORS Proxy Server running on port {}", local_addr.port());
    tracing::info!("Proxying requests to: {}", server.config().upstream.base_url);
    if let Some(dir) = &server.config().static_files.dir {
        if !dir.join("index.html").is_file() {
            tracing::warn!(dir = %dir.display(), "No index.html in web directory");
        }
        tracing::info!("Serving web files from: {}", dir.display());
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_handler(shutdown);

    server.run(listener, server_shutdown).await?;
    Ok(())
}
