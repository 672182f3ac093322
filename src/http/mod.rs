//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → cors.rs (preflight short-circuit, CORS response headers)
//!     → health.path → crate::health (liveness, never touches upstream)
//!     → everything else → proxy.rs
//!         → routing (prefix match, path rewrite)
//!         → headers.rs (filter/override request headers)
//!         → upstream via reqwest
//!         → headers.rs (filter response headers)
//!         → error.rs on failure ({"error", "details"} JSON)
//!     → outside the prefix → static_files.rs (web build) or 404
//!     → Send to client
//! ```

pub mod cors;
pub mod error;
pub mod headers;
pub mod proxy;
pub mod server;
pub mod static_files;

pub use cors::{CorsError, CorsPolicy};
pub use error::{ProxyError, ServerError};
pub use server::{AppState, HttpServer};
pub use static_files::StaticFiles;
