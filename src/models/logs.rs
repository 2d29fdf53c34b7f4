//! Read-only runtime signals: audit trail, traffic log, trace events and
//! server console output

use super::ResourceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audit action recorded by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Create => "CREATE",
            ActivityAction::Update => "UPDATE",
            ActivityAction::Delete => "DELETE",
            ActivityAction::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the configuration audit trail
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityLogEntry {
    #[serde(rename = "ID")]
    pub id: ResourceId,
    #[serde(rename = "Action")]
    pub action: ActivityAction,
    #[serde(rename = "Resource")]
    pub resource: String,
    #[serde(rename = "User")]
    pub user: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One proxied request as recorded by the traffic logger
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestLogEntry {
    #[serde(rename = "ID")]
    pub id: ResourceId,
    #[serde(rename = "RequestID")]
    pub request_id: String,
    #[serde(rename = "Method")]
    pub method: String,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "StatusCode")]
    pub status_code: u16,
    #[serde(rename = "LatencyMS")]
    pub latency_ms: u64,
    #[serde(rename = "ClientIP")]
    pub client_ip: String,
    #[serde(rename = "UserAgent")]
    pub user_agent: String,
    #[serde(rename = "ErrorMessage")]
    pub error_message: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RequestLogEntry {
    /// Status class such as "2xx" or "5xx"; "-" when no status was recorded
    pub fn status_class(&self) -> &'static str {
        match self.status_code {
            100..=199 => "1xx",
            200..=299 => "2xx",
            300..=399 => "3xx",
            400..=499 => "4xx",
            500..=599 => "5xx",
            _ => "-",
        }
    }

    pub fn is_error(&self) -> bool {
        self.status_code >= 400 || !self.error_message.is_empty()
    }
}

/// Severity of a trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    #[default]
    Info,
    Warn,
    Error,
    #[serde(other)]
    Unknown,
}

impl TraceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceLevel::Info => "INFO",
            TraceLevel::Warn => "WARN",
            TraceLevel::Error => "ERROR",
            TraceLevel::Unknown => "?",
        }
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic event recorded while serving one request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceEntry {
    #[serde(rename = "ID")]
    pub id: ResourceId,
    #[serde(rename = "RequestID")]
    pub request_id: String,
    #[serde(rename = "Level")]
    pub level: TraceLevel,
    #[serde(rename = "Component")]
    pub component: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A line of gateway server output
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerLogEntry {
    pub timestamp: Option<DateTime<Utc>>,
    pub message: String,
}

impl ServerLogEntry {
    /// Message without the trailing newline the server's log writer keeps
    pub fn line(&self) -> &str {
        self.message.trim_end_matches(['\r', '\n'])
    }
}
