//! Console views and the remote collections each one depends on

use crate::models::ResourceKind;
use std::fmt;
use std::str::FromStr;

/// A remotely held collection mirrored by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Services,
    Routes,
    ProtoMappings,
    ActivityLog,
    TrafficLog,
    ServerLog,
    Metrics,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Routes => "routes",
            Collection::ProtoMappings => "proto-mappings",
            Collection::ActivityLog => "activity-log",
            Collection::TrafficLog => "traffic-log",
            Collection::ServerLog => "server-log",
            Collection::Metrics => "metrics",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Collection::Services,
            Collection::Routes,
            Collection::ProtoMappings,
            Collection::ActivityLog,
            Collection::TrafficLog,
            Collection::ServerLog,
            Collection::Metrics,
        ]
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level console section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleView {
    #[default]
    Overview,
    Services,
    Routes,
    ProtoMappings,
    Traffic,
    SystemLogs,
}

impl ConsoleView {
    pub fn all() -> &'static [Self] {
        &[
            ConsoleView::Overview,
            ConsoleView::Services,
            ConsoleView::Routes,
            ConsoleView::ProtoMappings,
            ConsoleView::Traffic,
            ConsoleView::SystemLogs,
        ]
    }

    /// Collections that must be fetched for this view to render
    pub fn dependencies(&self) -> &'static [Collection] {
        match self {
            ConsoleView::Overview => &[
                Collection::Services,
                Collection::Routes,
                Collection::ProtoMappings,
                Collection::ActivityLog,
                Collection::TrafficLog,
            ],
            ConsoleView::Services => &[Collection::Services],
            // services feed the service selector in the route form
            ConsoleView::Routes => &[Collection::Routes, Collection::Services],
            ConsoleView::ProtoMappings => &[Collection::ProtoMappings, Collection::Services],
            ConsoleView::Traffic => &[Collection::TrafficLog],
            ConsoleView::SystemLogs => &[Collection::ServerLog],
        }
    }

    /// Resource managed from this view, if any
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        match self {
            ConsoleView::Services => Some(ResourceKind::Service),
            ConsoleView::Routes => Some(ResourceKind::Route),
            ConsoleView::ProtoMappings => Some(ResourceKind::ProtoMapping),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsoleView::Overview => "overview",
            ConsoleView::Services => "services",
            ConsoleView::Routes => "routes",
            ConsoleView::ProtoMappings => "proto-mappings",
            ConsoleView::Traffic => "traffic",
            ConsoleView::SystemLogs => "system-logs",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ConsoleView::Overview => "Overview",
            ConsoleView::Services => "Services",
            ConsoleView::Routes => "Routes",
            ConsoleView::ProtoMappings => "Proto Mappings",
            ConsoleView::Traffic => "Traffic",
            ConsoleView::SystemLogs => "System Logs",
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    /// View at a 0-based tab position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for ConsoleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsoleView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overview" | "home" => Ok(ConsoleView::Overview),
            "services" | "service" | "svc" => Ok(ConsoleView::Services),
            "routes" | "route" | "rt" => Ok(ConsoleView::Routes),
            "proto-mappings" | "protomappings" | "proto" | "pm" => Ok(ConsoleView::ProtoMappings),
            "traffic" | "request-logs" => Ok(ConsoleView::Traffic),
            "system-logs" | "systemlogs" | "logs" | "console" => Ok(ConsoleView::SystemLogs),
            other => Err(format!("Unknown view: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_dependencies() {
        assert_eq!(ConsoleView::Overview.dependencies().len(), 5);
        assert!(!ConsoleView::Overview
            .dependencies()
            .contains(&Collection::ServerLog));
        assert_eq!(
            ConsoleView::Routes.dependencies(),
            &[Collection::Routes, Collection::Services]
        );
        assert_eq!(
            ConsoleView::SystemLogs.dependencies(),
            &[Collection::ServerLog]
        );
    }

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(ConsoleView::SystemLogs.next(), ConsoleView::Overview);
        assert_eq!(ConsoleView::Overview.prev(), ConsoleView::SystemLogs);
        assert_eq!(ConsoleView::from_index(2), Some(ConsoleView::Routes));
        assert_eq!(ConsoleView::from_index(6), None);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("pm".parse::<ConsoleView>(), Ok(ConsoleView::ProtoMappings));
        assert_eq!("Logs".parse::<ConsoleView>(), Ok(ConsoleView::SystemLogs));
        assert!("dashboard".parse::<ConsoleView>().is_err());
    }
}
