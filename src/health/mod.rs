//! Liveness endpoint.
//!
//! Answers from the process alone; the upstream is never contacted, so the
//! endpoint stays green while the backend is down.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Body of a liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,

    /// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
    pub timestamp: String,
}

impl HealthStatus {
    pub fn now() -> Self {
        Self {
            status: "ok",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_timestamp_is_iso8601_utc() {
        let status = HealthStatus::now();
        assert_eq!(status.status, "ok");
        assert!(status.timestamp.ends_with('Z'), "{}", status.timestamp);
        assert_eq!(status.timestamp.len(), "2024-05-01T12:00:00.000Z".len());
        assert!(DateTime::parse_from_rfc3339(&status.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_handler_serializes_fields() {
        let Json(status) = health_handler().await;
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["status"], "ok");
        assert!(value["timestamp"].is_string());
    }
}
