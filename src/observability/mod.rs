//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! main.rs
//!     → logging::init_logging (EnvFilter + fmt layer, once per process)
//!
//! Every request:
//!     → SetRequestIdLayer (x-request-id)
//!     → TraceLayer (span per request)
//!     → logging::log_request ("Proxying: METHOD path")
//! ```
//!
//! # Design Decisions
//! - Line-based structured logging via `tracing`; no metrics endpoint
//! - Request ID flows into every log line and is returned to the client
//! - Log level configurable via `RUST_LOG`

pub mod logging;
