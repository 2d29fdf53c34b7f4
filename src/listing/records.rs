//! Listing definitions for every console collection

use super::{Listing, SortKey, SortValue};
use crate::models::{
    ActivityLogEntry, ProtoMapping, RequestLogEntry, Route, ServerLogEntry, Service,
};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceSortKey {
    Name,
    Protocol,
    Target,
}

impl SortKey for ServiceSortKey {
    fn all() -> &'static [Self] {
        &[
            ServiceSortKey::Name,
            ServiceSortKey::Protocol,
            ServiceSortKey::Target,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ServiceSortKey::Name => "NAME",
            ServiceSortKey::Protocol => "PROTOCOL",
            ServiceSortKey::Target => "TARGET",
        }
    }
}

impl Listing for Service {
    type SortKey = ServiceSortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.base_url.as_str(), self.grpc_address.as_str()]
    }

    fn category(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.protocol.as_str()))
    }

    fn sort_value(&self, key: ServiceSortKey) -> SortValue<'_> {
        match key {
            ServiceSortKey::Name => SortValue::text(&self.name),
            ServiceSortKey::Protocol => SortValue::text(self.protocol.as_str()),
            ServiceSortKey::Target => SortValue::text(self.target()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSortKey {
    Path,
    Method,
    Service,
    Tag,
}

impl SortKey for RouteSortKey {
    fn all() -> &'static [Self] {
        &[
            RouteSortKey::Path,
            RouteSortKey::Method,
            RouteSortKey::Service,
            RouteSortKey::Tag,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            RouteSortKey::Path => "PATH",
            RouteSortKey::Method => "METHOD",
            RouteSortKey::Service => "SERVICE",
            RouteSortKey::Tag => "TAG",
        }
    }
}

impl Listing for Route {
    type SortKey = RouteSortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.path.as_str(), self.endpoint_filter.as_str(), self.tag.as_str()]
    }

    fn category(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.method))
    }

    fn sort_value(&self, key: RouteSortKey) -> SortValue<'_> {
        match key {
            RouteSortKey::Path => SortValue::text(&self.path),
            RouteSortKey::Method => SortValue::text(&self.method),
            RouteSortKey::Service => SortValue::text(self.service_name()),
            RouteSortKey::Tag => SortValue::text(&self.tag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoMappingSortKey {
    RpcMethod,
    Service,
    Package,
}

impl SortKey for ProtoMappingSortKey {
    fn all() -> &'static [Self] {
        &[
            ProtoMappingSortKey::RpcMethod,
            ProtoMappingSortKey::Service,
            ProtoMappingSortKey::Package,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ProtoMappingSortKey::RpcMethod => "RPC METHOD",
            ProtoMappingSortKey::Service => "SERVICE",
            ProtoMappingSortKey::Package => "PACKAGE",
        }
    }
}

impl Listing for ProtoMapping {
    type SortKey = ProtoMappingSortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.rpc_method.as_str(),
            self.grpc_service_name.as_str(),
            self.proto_package.as_str(),
        ]
    }

    fn category(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.proto_package))
    }

    fn sort_value(&self, key: ProtoMappingSortKey) -> SortValue<'_> {
        match key {
            ProtoMappingSortKey::RpcMethod => SortValue::text(&self.rpc_method),
            ProtoMappingSortKey::Service => SortValue::text(self.service_name()),
            ProtoMappingSortKey::Package => SortValue::text(&self.proto_package),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestLogSortKey {
    CreatedAt,
    Status,
    Latency,
    Path,
}

impl SortKey for RequestLogSortKey {
    fn all() -> &'static [Self] {
        &[
            RequestLogSortKey::CreatedAt,
            RequestLogSortKey::Status,
            RequestLogSortKey::Latency,
            RequestLogSortKey::Path,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            RequestLogSortKey::CreatedAt => "TIME",
            RequestLogSortKey::Status => "STATUS",
            RequestLogSortKey::Latency => "LATENCY",
            RequestLogSortKey::Path => "PATH",
        }
    }
}

impl Listing for RequestLogEntry {
    type SortKey = RequestLogSortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.path.as_str(),
            self.request_id.as_str(),
            self.client_ip.as_str(),
            self.method.as_str(),
        ]
    }

    fn category(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.status_class()))
    }

    fn sort_value(&self, key: RequestLogSortKey) -> SortValue<'_> {
        match key {
            RequestLogSortKey::CreatedAt => SortValue::Time(self.created_at),
            RequestLogSortKey::Status => SortValue::Number(u64::from(self.status_code)),
            RequestLogSortKey::Latency => SortValue::Number(self.latency_ms),
            RequestLogSortKey::Path => SortValue::text(&self.path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySortKey {
    CreatedAt,
    Resource,
}

impl SortKey for ActivitySortKey {
    fn all() -> &'static [Self] {
        &[ActivitySortKey::CreatedAt, ActivitySortKey::Resource]
    }

    fn label(&self) -> &'static str {
        match self {
            ActivitySortKey::CreatedAt => "TIME",
            ActivitySortKey::Resource => "RESOURCE",
        }
    }
}

impl Listing for ActivityLogEntry {
    type SortKey = ActivitySortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.message.as_str(), self.resource.as_str(), self.user.as_str()]
    }

    fn category(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.action.as_str()))
    }

    fn sort_value(&self, key: ActivitySortKey) -> SortValue<'_> {
        match key {
            ActivitySortKey::CreatedAt => SortValue::Time(self.created_at),
            ActivitySortKey::Resource => SortValue::text(&self.resource),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerLogSortKey {
    Timestamp,
}

impl SortKey for ServerLogSortKey {
    fn all() -> &'static [Self] {
        &[ServerLogSortKey::Timestamp]
    }

    fn label(&self) -> &'static str {
        "TIME"
    }
}

impl Listing for ServerLogEntry {
    type SortKey = ServerLogSortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.message.as_str()]
    }

    fn sort_value(&self, key: ServerLogSortKey) -> SortValue<'_> {
        match key {
            ServerLogSortKey::Timestamp => SortValue::Time(self.timestamp),
        }
    }
}
