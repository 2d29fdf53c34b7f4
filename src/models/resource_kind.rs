//! Resource kind definitions
//!
//! Centralized enum for the gateway resources that can be created, edited
//! and deleted from the console. Avoids hardcoded strings for API paths and
//! display names.

use std::fmt;
use std::str::FromStr;

/// Enumeration of the CRUD-manageable gateway resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Service,
    Route,
    ProtoMapping,
}

impl ResourceKind {
    /// Get the display name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Service => "Service",
            ResourceKind::Route => "Route",
            ResourceKind::ProtoMapping => "ProtoMapping",
        }
    }

    /// Human-readable label used in prompts and form titles
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Service => "service",
            ResourceKind::Route => "route",
            ResourceKind::ProtoMapping => "proto mapping",
        }
    }

    /// Collection path segment under `/admin/`
    pub fn api_segment(&self) -> &'static str {
        match self {
            ResourceKind::Service => "services",
            ResourceKind::Route => "routes",
            ResourceKind::ProtoMapping => "proto-mappings",
        }
    }

    /// Get all resource kinds
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Service,
            ResourceKind::Route,
            ResourceKind::ProtoMapping,
        ]
    }

    /// Try to parse a string (case-insensitive, with aliases) into a ResourceKind
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "service" | "services" | "svc" => Some(ResourceKind::Service),
            "route" | "routes" | "rt" => Some(ResourceKind::Route),
            "protomapping" | "proto-mapping" | "proto-mappings" | "proto" | "pm" => {
                Some(ResourceKind::ProtoMapping)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_case_insensitive(s).ok_or_else(|| format!("Unknown resource kind: {}", s))
    }
}
