//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → matcher.rs (is the path under the proxied prefix?)
//!     → rewrite.rs (map the path onto the upstream path space)
//!     → forward target = upstream base + rewritten path + query
//! ```
//!
//! # Design Decisions
//! - Matchers and rewrite rules compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: first rewrite rule that matches wins

pub mod matcher;
pub mod rewrite;

pub use matcher::PathPrefixMatcher;
pub use rewrite::PathRewriter;
