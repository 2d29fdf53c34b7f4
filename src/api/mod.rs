//! Gateway admin API boundary
//!
//! `AdminApi` is the seam every other layer talks to. `HttpAdminClient` is
//! the production implementation; tests substitute fakes or mocks.

pub mod error;
pub mod http;

pub use error::ApiError;
pub use http::HttpAdminClient;

use crate::models::{
    ActivityLogEntry, MetricsSnapshot, ProtoMapping, ProtoMappingDraft, RequestLogEntry,
    ResourceId, ResourceKind, Route, RouteDraft, ServerLogEntry, Service, ServiceDraft,
    TraceEntry,
};
use async_trait::async_trait;

/// Operations exposed by the gateway under `/admin/`
///
/// List calls treat an empty or `null` body as an empty collection. Mutations
/// return the persisted record including its identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_services(&self) -> Result<Vec<Service>, ApiError>;
    async fn create_service(&self, draft: &ServiceDraft) -> Result<Service, ApiError>;
    async fn update_service(
        &self,
        id: ResourceId,
        draft: &ServiceDraft,
    ) -> Result<Service, ApiError>;
    async fn delete_service(&self, id: ResourceId) -> Result<(), ApiError>;

    async fn list_routes(&self) -> Result<Vec<Route>, ApiError>;
    async fn create_route(&self, draft: &RouteDraft) -> Result<Route, ApiError>;
    async fn update_route(&self, id: ResourceId, draft: &RouteDraft) -> Result<Route, ApiError>;
    async fn delete_route(&self, id: ResourceId) -> Result<(), ApiError>;

    async fn list_proto_mappings(&self) -> Result<Vec<ProtoMapping>, ApiError>;
    async fn create_proto_mapping(
        &self,
        draft: &ProtoMappingDraft,
    ) -> Result<ProtoMapping, ApiError>;
    async fn update_proto_mapping(
        &self,
        id: ResourceId,
        draft: &ProtoMappingDraft,
    ) -> Result<ProtoMapping, ApiError>;
    async fn delete_proto_mapping(&self, id: ResourceId) -> Result<(), ApiError>;

    async fn metrics(&self) -> Result<MetricsSnapshot, ApiError>;
    async fn activity_logs(&self) -> Result<Vec<ActivityLogEntry>, ApiError>;
    async fn request_logs(&self) -> Result<Vec<RequestLogEntry>, ApiError>;
    async fn server_logs(&self) -> Result<Vec<ServerLogEntry>, ApiError>;

    /// Trace events of one request, in the order the backend returns them
    async fn traces(&self, request_id: &str) -> Result<Vec<TraceEntry>, ApiError>;
}

/// Delete a resource of any kind by identifier
pub async fn delete_resource(
    api: &dyn AdminApi,
    kind: ResourceKind,
    id: ResourceId,
) -> Result<(), ApiError> {
    match kind {
        ResourceKind::Service => api.delete_service(id).await,
        ResourceKind::Route => api.delete_route(id).await,
        ResourceKind::ProtoMapping => api.delete_proto_mapping(id).await,
    }
}
