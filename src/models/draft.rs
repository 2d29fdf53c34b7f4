//! Mutation payloads
//!
//! A draft is a record minus its identifier as sent in create/update request
//! bodies. The identifier is kept beside the payload (never serialized) and
//! decides whether a submit creates or updates.

use super::{ProtoMapping, Protocol, ResourceId, ResourceKind, Route, Service};
use serde::Serialize;

/// HTTP methods offered for routes
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ServiceDraft {
    #[serde(skip)]
    pub id: Option<ResourceId>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Protocol")]
    pub protocol: Protocol,
    #[serde(rename = "BaseURL")]
    pub base_url: String,
    #[serde(rename = "GRPCAddr")]
    pub grpc_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDraft {
    #[serde(skip)]
    pub id: Option<ResourceId>,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Method")]
    pub method: String,
    #[serde(rename = "ServiceID")]
    pub service_id: Option<ResourceId>,
    #[serde(rename = "EndpointFilter")]
    pub endpoint_filter: String,
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Middleware", skip_serializing_if = "String::is_empty")]
    pub middleware: String,
}

impl Default for RouteDraft {
    fn default() -> Self {
        Self {
            id: None,
            path: String::new(),
            method: HTTP_METHODS[0].to_string(),
            service_id: None,
            endpoint_filter: String::new(),
            tag: String::new(),
            middleware: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProtoMappingDraft {
    #[serde(skip)]
    pub id: Option<ResourceId>,
    #[serde(rename = "ServiceID")]
    pub service_id: Option<ResourceId>,
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
}

impl From<&Service> for ServiceDraft {
    fn from(service: &Service) -> Self {
        Self {
            id: Some(service.id),
            name: service.name.clone(),
            protocol: service.protocol,
            base_url: service.base_url.clone(),
            grpc_address: service.grpc_address.clone(),
        }
    }
}

impl From<&Route> for RouteDraft {
    fn from(route: &Route) -> Self {
        Self {
            id: Some(route.id),
            path: route.path.clone(),
            method: route.method.clone(),
            service_id: Some(route.service_id),
            endpoint_filter: route.endpoint_filter.clone(),
            tag: route.tag.clone(),
            middleware: route.middleware.clone(),
        }
    }
}

impl From<&ProtoMapping> for ProtoMappingDraft {
    fn from(mapping: &ProtoMapping) -> Self {
        Self {
            id: Some(mapping.id),
            service_id: Some(mapping.service_id),
            rpc_method: mapping.rpc_method.clone(),
            grpc_service_name: mapping.grpc_service_name.clone(),
            proto_package: mapping.proto_package.clone(),
            request_type: mapping.request_type.clone(),
            response_type: mapping.response_type.clone(),
        }
    }
}

/// Modal payload, one variant per resource kind
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceDraft {
    Service(ServiceDraft),
    Route(RouteDraft),
    ProtoMapping(ProtoMappingDraft),
}

impl ResourceDraft {
    /// Empty draft for "create new <kind>"
    pub fn new(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Service => ResourceDraft::Service(ServiceDraft::default()),
            ResourceKind::Route => ResourceDraft::Route(RouteDraft::default()),
            ResourceKind::ProtoMapping => ResourceDraft::ProtoMapping(ProtoMappingDraft::default()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceDraft::Service(_) => ResourceKind::Service,
            ResourceDraft::Route(_) => ResourceKind::Route,
            ResourceDraft::ProtoMapping(_) => ResourceKind::ProtoMapping,
        }
    }

    /// Identifier of the record being edited, `None` when creating
    pub fn id(&self) -> Option<ResourceId> {
        match self {
            ResourceDraft::Service(d) => d.id,
            ResourceDraft::Route(d) => d.id,
            ResourceDraft::ProtoMapping(d) => d.id,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

impl From<&Service> for ResourceDraft {
    fn from(service: &Service) -> Self {
        ResourceDraft::Service(service.into())
    }
}

impl From<&Route> for ResourceDraft {
    fn from(route: &Route) -> Self {
        ResourceDraft::Route(route.into())
    }
}

impl From<&ProtoMapping> for ResourceDraft {
    fn from(mapping: &ProtoMapping) -> Self {
        ResourceDraft::ProtoMapping(mapping.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_body_omits_id() {
        let service = Service {
            id: 7,
            name: "payments".to_string(),
            protocol: Protocol::Grpc,
            grpc_address: "payments:9090".to_string(),
            ..Default::default()
        };
        let draft = ServiceDraft::from(&service);
        assert_eq!(draft.id, Some(7));

        let body = serde_json::to_value(&draft).unwrap();
        assert!(body.get("ID").is_none());
        assert_eq!(body["Protocol"], "grpc");
        assert_eq!(body["GRPCAddr"], "payments:9090");
    }

    #[test]
    fn test_new_draft_has_no_id() {
        for kind in ResourceKind::all() {
            let draft = ResourceDraft::new(*kind);
            assert!(draft.is_new());
            assert_eq!(draft.kind(), *kind);
        }
    }

    #[test]
    fn test_route_draft_defaults_to_get() {
        assert_eq!(RouteDraft::default().method, "GET");
    }
}
