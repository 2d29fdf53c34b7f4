//! Required-field checks run before any mutation request

use super::form::FormField;
use crate::models::{Protocol, ResourceDraft, ResourceId, ResourceKind};
use std::fmt;

/// Required fields left empty in a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ResourceKind,
    pub missing: Vec<FormField>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = self.missing.iter().map(|field| field.label()).collect();
        write!(
            f,
            "{} is missing required fields: {}",
            self.kind.display_name(),
            labels.join(", ")
        )
    }
}

impl std::error::Error for ValidationError {}

fn blank(value: &str) -> bool {
    value.is_empty()
}

fn unset(id: Option<ResourceId>) -> bool {
    matches!(id, None | Some(0))
}

/// Check that every required field of `draft` is filled in
///
/// Only emptiness is checked. Whether a referenced service exists is left to
/// the backend.
pub fn validate(draft: &ResourceDraft) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    let mut require = |field: FormField, empty: bool| {
        if empty {
            missing.push(field);
        }
    };

    match draft {
        ResourceDraft::Service(d) => {
            require(FormField::Name, blank(&d.name));
            match d.protocol {
                Protocol::Rest => require(FormField::BaseUrl, blank(&d.base_url)),
                Protocol::Grpc => require(FormField::GrpcAddress, blank(&d.grpc_address)),
            }
        }
        ResourceDraft::Route(d) => {
            require(FormField::Path, blank(&d.path));
            require(FormField::Method, blank(&d.method));
            require(FormField::Service, unset(d.service_id));
            require(FormField::EndpointFilter, blank(&d.endpoint_filter));
        }
        ResourceDraft::ProtoMapping(d) => {
            require(FormField::Service, unset(d.service_id));
            require(FormField::RpcMethod, blank(&d.rpc_method));
            require(FormField::ProtoPackage, blank(&d.proto_package));
            require(FormField::GrpcServiceName, blank(&d.grpc_service_name));
            require(FormField::RequestType, blank(&d.request_type));
            require(FormField::ResponseType, blank(&d.response_type));
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            kind: draft.kind(),
            missing,
        })
    }
}
