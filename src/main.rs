//! API CORS Proxy
//!
//! Forwards `/api/*` to a single upstream origin, adds permissive CORS
//! headers to every response and answers `/health` locally.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                  CORS PROXY                   │
//!     Client Request     │  ┌──────────┐   ┌────────┐   ┌────────────┐  │
//!     ───────────────────┼─▶│ request  │──▶│  CORS  │──▶│  routing   │  │
//!                        │  │ id + log │   │ layer  │   │  rewrite   │  │
//!                        │  └──────────┘   └───┬────┘   └─────┬──────┘  │
//!                        │          preflight  │              │         │
//!                        │          / health ◀─┘              ▼         │
//!     Client Response    │                              ┌────────────┐  │
//!     ◀──────────────────┼──────────────────────────────│  reqwest   │◀─┼──── Upstream
//!                        │                              │  client    │  │
//!                        │                              └────────────┘  │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use api_cors_proxy::config::{load_config, CliOverrides};
use api_cors_proxy::lifecycle;
use api_cors_proxy::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "api-cors-proxy")]
#[command(about = "CORS-enabling reverse proxy for a single API upstream", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Upstream base URL (overrides UPSTREAM_URL).
    #[arg(short, long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let overrides = CliOverrides {
        port: cli.port,
        upstream: cli.upstream,
    };

    let config = match load_config(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        bind_address = %config.bind_address(),
        prefix = %config.proxy.prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if let Err(e) = lifecycle::start(config).await {
        tracing::error!(error = %e, "Proxy terminated");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
