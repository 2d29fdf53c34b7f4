//! Per-service metrics snapshot
//!
//! The backend recomputes the whole registry on every request; the console
//! replaces its copy wholesale on each poll.

use super::null_as_default;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metrics for every service, keyed by service name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub services: BTreeMap<String, ServiceMetrics>,
    pub start_time: Option<DateTime<Utc>>,
}

/// Counters and latency for one service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceMetrics {
    pub total_requests: u64,
    pub total_errors: u64,
    pub avg_latency_ms: f64,
    pub last_status: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub status_counts: BTreeMap<u16, u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub path_metrics: BTreeMap<String, PathMetrics>,
    /// 0-100, higher is healthier
    pub health_score: u32,
    /// `CLOSED`, `OPEN` or `HALF-OPEN`
    pub circuit_status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathMetrics {
    pub count: u64,
    pub avg_latency_ms: f64,
}

impl ServiceMetrics {
    /// Fraction of requests that failed, 0.0 when nothing was served
    pub fn error_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.total_errors as f64 / self.total_requests as f64
        }
    }

    pub fn circuit_open(&self) -> bool {
        self.circuit_status.eq_ignore_ascii_case("OPEN")
    }
}

impl MetricsSnapshot {
    pub fn service(&self, name: &str) -> Option<&ServiceMetrics> {
        self.services.get(name)
    }

    pub fn total_requests(&self) -> u64 {
        self.services.values().map(|m| m.total_requests).sum()
    }

    pub fn total_errors(&self) -> u64 {
        self.services.values().map(|m| m.total_errors).sum()
    }

    /// Request-weighted mean latency across services
    pub fn avg_latency_ms(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .services
            .values()
            .map(|m| m.avg_latency_ms * m.total_requests as f64)
            .sum();
        weighted / total as f64
    }
}
