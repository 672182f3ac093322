//! Path rewriting between the inbound and upstream path spaces.
//!
//! Rules are plain prefix substitutions evaluated in order; the first rule
//! whose `from` is a prefix of the path replaces that prefix with `to`.
//! Paths no rule matches are forwarded unchanged.

use std::borrow::Cow;

use crate::config::RewriteRule;

/// Ordered, immutable set of prefix rewrite rules.
#[derive(Debug, Clone, Default)]
pub struct PathRewriter {
    rules: Vec<RewriteRule>,
}

impl PathRewriter {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Rewrite `path` with the first matching rule.
    pub fn rewrite<'a>(&self, path: &'a str) -> Cow<'a, str> {
        for rule in &self.rules {
            if let Some(rest) = path.strip_prefix(rule.from.as_str()) {
                if rule.from == rule.to {
                    return Cow::Borrowed(path);
                }
                return Cow::Owned(join(&rule.to, rest));
            }
        }
        Cow::Borrowed(path)
    }
}

fn join(to: &str, rest: &str) -> String {
    // "/api" → "/" must give "/items", not "//items"
    let rest = if to.ends_with('/') {
        rest.strip_prefix('/').unwrap_or(rest)
    } else {
        rest
    };
    let joined = format!("{}{}", to, rest);
    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}
