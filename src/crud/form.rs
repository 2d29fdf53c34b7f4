//! Field-level editing of resource drafts
//!
//! Text fields take typed input; protocol, HTTP method and service are
//! choices cycled through their allowed values.

use crate::models::draft::HTTP_METHODS;
use crate::models::{Protocol, ResourceDraft, ResourceId, ResourceKind, Service};

/// An editable field of a resource form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Protocol,
    BaseUrl,
    GrpcAddress,
    Path,
    Method,
    Service,
    EndpointFilter,
    Tag,
    RpcMethod,
    GrpcServiceName,
    ProtoPackage,
    RequestType,
    ResponseType,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Protocol => "Protocol",
            FormField::BaseUrl => "Base URL",
            FormField::GrpcAddress => "gRPC Address",
            FormField::Path => "Path",
            FormField::Method => "Method",
            FormField::Service => "Service",
            FormField::EndpointFilter => "Endpoint Filter",
            FormField::Tag => "Tag",
            FormField::RpcMethod => "RPC Method",
            FormField::GrpcServiceName => "gRPC Service",
            FormField::ProtoPackage => "Proto Package",
            FormField::RequestType => "Request Type",
            FormField::ResponseType => "Response Type",
        }
    }

    /// Choice fields are cycled instead of typed
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FormField::Protocol | FormField::Method | FormField::Service
        )
    }
}

/// Services a draft of `kind` may reference
///
/// Proto mappings only target gRPC services.
pub fn eligible_services(kind: ResourceKind, services: &[Service]) -> Vec<&Service> {
    services
        .iter()
        .filter(|s| kind != ResourceKind::ProtoMapping || s.protocol == Protocol::Grpc)
        .collect()
}

fn service_label(id: Option<ResourceId>, services: &[Service]) -> String {
    match id {
        None => "<none>".to_string(),
        Some(id) => services
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("#{}", id)),
    }
}

fn cycle_index(current: Option<usize>, len: usize, forward: bool) -> usize {
    match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    }
}

impl ResourceDraft {
    /// Fields shown for this draft, in display order
    ///
    /// Services only show the address their protocol uses.
    pub fn fields(&self) -> Vec<FormField> {
        match self {
            ResourceDraft::Service(d) => vec![
                FormField::Name,
                FormField::Protocol,
                match d.protocol {
                    Protocol::Rest => FormField::BaseUrl,
                    Protocol::Grpc => FormField::GrpcAddress,
                },
            ],
            ResourceDraft::Route(_) => vec![
                FormField::Path,
                FormField::Method,
                FormField::Service,
                FormField::EndpointFilter,
                FormField::Tag,
            ],
            ResourceDraft::ProtoMapping(_) => vec![
                FormField::Service,
                FormField::RpcMethod,
                FormField::GrpcServiceName,
                FormField::ProtoPackage,
                FormField::RequestType,
                FormField::ResponseType,
            ],
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match (self, field) {
            (ResourceDraft::Service(d), FormField::Name) => Some(&mut d.name),
            (ResourceDraft::Service(d), FormField::BaseUrl) => Some(&mut d.base_url),
            (ResourceDraft::Service(d), FormField::GrpcAddress) => Some(&mut d.grpc_address),
            (ResourceDraft::Route(d), FormField::Path) => Some(&mut d.path),
            (ResourceDraft::Route(d), FormField::EndpointFilter) => Some(&mut d.endpoint_filter),
            (ResourceDraft::Route(d), FormField::Tag) => Some(&mut d.tag),
            (ResourceDraft::ProtoMapping(d), FormField::RpcMethod) => Some(&mut d.rpc_method),
            (ResourceDraft::ProtoMapping(d), FormField::GrpcServiceName) => {
                Some(&mut d.grpc_service_name)
            }
            (ResourceDraft::ProtoMapping(d), FormField::ProtoPackage) => Some(&mut d.proto_package),
            (ResourceDraft::ProtoMapping(d), FormField::RequestType) => Some(&mut d.request_type),
            (ResourceDraft::ProtoMapping(d), FormField::ResponseType) => {
                Some(&mut d.response_type)
            }
            _ => None,
        }
    }

    /// Display value of `field`; services are shown by name
    pub fn value(&self, field: FormField, services: &[Service]) -> String {
        match (self, field) {
            (ResourceDraft::Service(d), FormField::Name) => d.name.clone(),
            (ResourceDraft::Service(d), FormField::Protocol) => d.protocol.to_string(),
            (ResourceDraft::Service(d), FormField::BaseUrl) => d.base_url.clone(),
            (ResourceDraft::Service(d), FormField::GrpcAddress) => d.grpc_address.clone(),
            (ResourceDraft::Route(d), FormField::Path) => d.path.clone(),
            (ResourceDraft::Route(d), FormField::Method) => d.method.clone(),
            (ResourceDraft::Route(d), FormField::Service) => service_label(d.service_id, services),
            (ResourceDraft::Route(d), FormField::EndpointFilter) => d.endpoint_filter.clone(),
            (ResourceDraft::Route(d), FormField::Tag) => d.tag.clone(),
            (ResourceDraft::ProtoMapping(d), FormField::Service) => {
                service_label(d.service_id, services)
            }
            (ResourceDraft::ProtoMapping(d), FormField::RpcMethod) => d.rpc_method.clone(),
            (ResourceDraft::ProtoMapping(d), FormField::GrpcServiceName) => {
                d.grpc_service_name.clone()
            }
            (ResourceDraft::ProtoMapping(d), FormField::ProtoPackage) => d.proto_package.clone(),
            (ResourceDraft::ProtoMapping(d), FormField::RequestType) => d.request_type.clone(),
            (ResourceDraft::ProtoMapping(d), FormField::ResponseType) => d.response_type.clone(),
            _ => String::new(),
        }
    }

    /// Replace a text field; returns false for choice or foreign fields
    pub fn set_field(&mut self, field: FormField, value: &str) -> bool {
        match self.text_mut(field) {
            Some(text) => {
                *text = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn input_char(&mut self, field: FormField, c: char) {
        if let Some(text) = self.text_mut(field) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self, field: FormField) {
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    /// Step a choice field to its next (or previous) allowed value
    pub fn cycle(&mut self, field: FormField, services: &[Service], forward: bool) {
        let kind = self.kind();
        match (self, field) {
            (ResourceDraft::Service(d), FormField::Protocol) => {
                d.protocol = match d.protocol {
                    Protocol::Rest => Protocol::Grpc,
                    Protocol::Grpc => Protocol::Rest,
                };
            }
            (ResourceDraft::Route(d), FormField::Method) => {
                let current = HTTP_METHODS
                    .iter()
                    .position(|m| m.eq_ignore_ascii_case(&d.method));
                let next = cycle_index(current, HTTP_METHODS.len(), forward);
                d.method = HTTP_METHODS[next].to_string();
            }
            (ResourceDraft::Route(d), FormField::Service) => {
                d.service_id = next_service(d.service_id, kind, services, forward);
            }
            (ResourceDraft::ProtoMapping(d), FormField::Service) => {
                d.service_id = next_service(d.service_id, kind, services, forward);
            }
            _ => {}
        }
    }
}

fn next_service(
    current: Option<ResourceId>,
    kind: ResourceKind,
    services: &[Service],
    forward: bool,
) -> Option<ResourceId> {
    let eligible = eligible_services(kind, services);
    if eligible.is_empty() {
        return current;
    }
    let position = current.and_then(|id| eligible.iter().position(|s| s.id == id));
    Some(eligible[cycle_index(position, eligible.len(), forward)].id)
}
