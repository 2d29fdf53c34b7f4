//! Fetching and rendering trace timelines

use crate::api::AdminApi;
use crate::models::TraceEntry;
use chrono::{DateTime, Utc};

/// Fetch the timeline of `request_id`, oldest event first
///
/// A failed fetch is reported to the log and treated as an empty timeline.
pub async fn fetch_timeline(api: &dyn AdminApi, request_id: &str) -> Vec<TraceEntry> {
    match api.traces(request_id).await {
        Ok(mut entries) => {
            // stable: events sharing a timestamp keep backend order
            entries.sort_by_key(|e| e.created_at);
            tracing::debug!("Fetched {} trace events for {}", entries.len(), request_id);
            entries
        }
        Err(e) => {
            tracing::warn!("Failed to fetch trace for {}: {}", request_id, e);
            Vec::new()
        }
    }
}

/// Offset of `at` from `start`, "+?" when either is unknown
pub fn format_offset(start: Option<DateTime<Utc>>, at: Option<DateTime<Utc>>) -> String {
    match (start, at) {
        (Some(start), Some(at)) => {
            let ms = (at - start).num_milliseconds().max(0);
            if ms < 1000 {
                format!("+{}ms", ms)
            } else {
                format!("+{:.3}s", ms as f64 / 1000.0)
            }
        }
        _ => "+?".to_string(),
    }
}

/// Plain-text timeline with offsets relative to the first timestamped event
pub fn format_timeline(entries: &[TraceEntry]) -> String {
    if entries.is_empty() {
        return "no events".to_string();
    }

    let start = entries.iter().find_map(|e| e.created_at);
    entries
        .iter()
        .map(|e| {
            let line = format!(
                "{:<8}  {:<5}  {:<10}  {}",
                format_offset(start, e.created_at),
                e.level.as_str(),
                e.component,
                e.message
            );
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockAdminApi};
    use crate::models::TraceLevel;
    use chrono::TimeZone;

    fn at(ms: i64) -> Option<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).single()?;
        Some(base + chrono::Duration::milliseconds(ms))
    }

    fn event(ms: i64, level: TraceLevel, component: &str, message: &str) -> TraceEntry {
        TraceEntry {
            request_id: "req-1".to_string(),
            level,
            component: component.to_string(),
            message: message.to_string(),
            created_at: at(ms),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_timeline() {
        let entries = vec![
            event(0, TraceLevel::Info, "gateway", "request received"),
            event(12, TraceLevel::Info, "router", "matched route /v1/auth"),
            event(1250, TraceLevel::Error, "proxy", "upstream timeout"),
        ];
        insta::assert_snapshot!(format_timeline(&entries), @r"
        +0ms      INFO   gateway     request received
        +12ms     INFO   router      matched route /v1/auth
        +1.250s   ERROR  proxy       upstream timeout
        ");
    }

    #[test]
    fn test_empty_timeline() {
        assert_eq!(format_timeline(&[]), "no events");
    }

    #[tokio::test]
    async fn test_fetch_sorts_ascending_and_keeps_ties() {
        let mut mock = MockAdminApi::new();
        mock.expect_traces().times(1).returning(|_| {
            Ok(vec![
                event(20, TraceLevel::Info, "proxy", "response"),
                event(0, TraceLevel::Info, "gateway", "first"),
                event(0, TraceLevel::Warn, "auth", "second"),
            ])
        });
        let messages: Vec<_> = fetch_timeline(&mock, "req-1")
            .await
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["first", "second", "response"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_empty() {
        let mut mock = MockAdminApi::new();
        mock.expect_traces().returning(|_| {
            Err(ApiError::Transport {
                url: "http://localhost:8080/admin/traces/req-1".to_string(),
                message: "request timed out".to_string(),
            })
        });
        assert!(fetch_timeline(&mock, "req-1").await.is_empty());
    }
}
