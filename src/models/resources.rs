//! Routing configuration records: services, routes and proto mappings
//!
//! Field names on the wire follow the gateway backend (`ID`, `BaseURL`,
//! `GRPCAddr`, ...). Every field is optional on the wire and falls back to
//! its default.

use super::ResourceKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-assigned identifier. The console never invents one.
pub type ResourceId = u64;

/// Upstream protocol of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Protocol {
    #[default]
    Rest,
    Grpc,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Rest => "rest",
            Protocol::Grpc => "grpc",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Protocol::Rest, Protocol::Grpc]
    }
}

impl From<String> for Protocol {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("grpc") {
            Protocol::Grpc
        } else {
            Protocol::Rest
        }
    }
}

impl From<Protocol> for String {
    fn from(protocol: Protocol) -> Self {
        protocol.as_str().to_string()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An upstream service the gateway forwards to
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(rename = "ID")]
    pub id: ResourceId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Protocol")]
    pub protocol: Protocol,
    #[serde(rename = "BaseURL")]
    pub base_url: String,
    #[serde(rename = "GRPCAddr")]
    pub grpc_address: String,
    #[serde(rename = "CreatedAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "UpdatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Service {
    /// The address that is active for this service's protocol
    pub fn target(&self) -> &str {
        match self.protocol {
            Protocol::Rest => &self.base_url,
            Protocol::Grpc => &self.grpc_address,
        }
    }
}

/// A path route mapped onto a service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    #[serde(rename = "ID")]
    pub id: ResourceId,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Method")]
    pub method: String,
    #[serde(rename = "ServiceID")]
    pub service_id: ResourceId,
    /// Related service, preloaded by the backend when available
    #[serde(rename = "Service", skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    #[serde(rename = "EndpointFilter")]
    pub endpoint_filter: String,
    #[serde(rename = "Tag")]
    pub tag: String,
    /// JSON-encoded list of middleware names, opaque to the console
    #[serde(rename = "Middleware")]
    pub middleware: String,
    #[serde(rename = "CreatedAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Route {
    /// Display name of the related service, empty when it was not preloaded
    pub fn service_name(&self) -> &str {
        self.service.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }
}

/// Mapping of an RPC method onto a gRPC service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtoMapping {
    #[serde(rename = "ID")]
    pub id: ResourceId,
    #[serde(rename = "ServiceID")]
    pub service_id: ResourceId,
    #[serde(rename = "Service", skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    #[serde(rename = "RPCMethod")]
    pub rpc_method: String,
    #[serde(rename = "GRPCServiceName")]
    pub grpc_service_name: String,
    #[serde(rename = "ProtoPackage")]
    pub proto_package: String,
    #[serde(rename = "RequestType")]
    pub request_type: String,
    #[serde(rename = "ResponseType")]
    pub response_type: String,
    #[serde(rename = "CreatedAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProtoMapping {
    /// Display name of the related service, empty when it was not preloaded
    pub fn service_name(&self) -> &str {
        self.service.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }
}

/// A record as persisted and returned by a create or update call
#[derive(Debug, Clone, PartialEq)]
pub enum SavedRecord {
    Service(Service),
    Route(Route),
    ProtoMapping(ProtoMapping),
}

impl SavedRecord {
    pub fn kind(&self) -> ResourceKind {
        match self {
            SavedRecord::Service(_) => ResourceKind::Service,
            SavedRecord::Route(_) => ResourceKind::Route,
            SavedRecord::ProtoMapping(_) => ResourceKind::ProtoMapping,
        }
    }

    pub fn id(&self) -> ResourceId {
        match self {
            SavedRecord::Service(s) => s.id,
            SavedRecord::Route(r) => r.id,
            SavedRecord::ProtoMapping(m) => m.id,
        }
    }

    /// Short label for status messages
    pub fn label(&self) -> &str {
        match self {
            SavedRecord::Service(s) => &s.name,
            SavedRecord::Route(r) => &r.path,
            SavedRecord::ProtoMapping(m) => &m.rpc_method,
        }
    }
}
