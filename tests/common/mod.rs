//! Shared fixtures for integration tests
//!
//! `FakeAdminApi` keeps gateway state in memory, records every call and can
//! be told to fail or stall individual methods.

#![allow(dead_code)]

use async_trait::async_trait;
use gate9s::api::{AdminApi, ApiError};
use gate9s::models::{
    ActivityLogEntry, MetricsSnapshot, ProtoMapping, ProtoMappingDraft, Protocol, RequestLogEntry,
    ResourceId, Route, RouteDraft, ServerLogEntry, Service, ServiceDraft, ServiceMetrics,
    TraceEntry,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Default)]
struct State {
    services: Vec<Service>,
    routes: Vec<Route>,
    proto_mappings: Vec<ProtoMapping>,
    activity: Vec<ActivityLogEntry>,
    requests: Vec<RequestLogEntry>,
    server_log: Vec<ServerLogEntry>,
    metrics: MetricsSnapshot,
    traces: HashMap<String, Vec<TraceEntry>>,
    /// Scripted `list_services` responses, consumed in call order
    scripted_services: VecDeque<(Duration, Vec<Service>)>,
    /// Scripted `metrics` responses, consumed in call order
    scripted_metrics: VecDeque<(Duration, MetricsSnapshot)>,
    failing: HashSet<&'static str>,
    delays: HashMap<&'static str, Duration>,
    calls: Vec<String>,
    next_id: ResourceId,
}

/// In-memory gateway admin API
#[derive(Default)]
pub struct FakeAdminApi {
    state: Mutex<State>,
}

impl FakeAdminApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.lock().next_id = 100;
        api
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn with_services(self, services: Vec<Service>) -> Self {
        self.lock().services = services;
        self
    }

    pub fn with_routes(self, routes: Vec<Route>) -> Self {
        self.lock().routes = routes;
        self
    }

    pub fn with_requests(self, requests: Vec<RequestLogEntry>) -> Self {
        self.lock().requests = requests;
        self
    }

    pub fn with_server_log(self, lines: Vec<ServerLogEntry>) -> Self {
        self.lock().server_log = lines;
        self
    }

    pub fn with_proto_mappings(self, mappings: Vec<ProtoMapping>) -> Self {
        self.lock().proto_mappings = mappings;
        self
    }

    pub fn with_metrics(self, metrics: MetricsSnapshot) -> Self {
        self.lock().metrics = metrics;
        self
    }

    pub fn with_trace(self, request_id: &str, entries: Vec<TraceEntry>) -> Self {
        self.lock().traces.insert(request_id.to_string(), entries);
        self
    }

    pub fn set_services(&self, services: Vec<Service>) {
        self.lock().services = services;
    }

    pub fn fail(&self, method: &'static str) {
        self.lock().failing.insert(method);
    }

    pub fn recover(&self, method: &'static str) {
        self.lock().failing.remove(method);
    }

    pub fn delay(&self, method: &'static str, delay: Duration) {
        self.lock().delays.insert(method, delay);
    }

    /// Queue a `list_services` response that resolves after `delay`
    pub fn script_services(&self, delay: Duration, services: Vec<Service>) {
        self.lock().scripted_services.push_back((delay, services));
    }

    /// Queue a `metrics` response that resolves after `delay`
    pub fn script_metrics(&self, delay: Duration, metrics: MetricsSnapshot) {
        self.lock().scripted_metrics.push_back((delay, metrics));
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.split(':').next() == Some(method))
            .count()
    }

    pub fn mutation_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| !c.starts_with("list_") && !c.contains("logs") && *c != "metrics")
            .filter(|c| !c.starts_with("traces"))
            .count()
    }

    async fn begin(&self, call: String) -> Result<(), ApiError> {
        let method = call.split(':').next().unwrap_or_default().to_string();
        let (delay, failing) = {
            let mut state = self.lock();
            state.calls.push(call);
            (
                state.delays.get(method.as_str()).copied(),
                state.failing.contains(method.as_str()),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            Err(ApiError::Status {
                method: "GET".to_string(),
                url: format!("http://gateway.test/admin/{}", method),
                status: 500,
                body: format!("{} unavailable", method),
            })
        } else {
            Ok(())
        }
    }

    fn next_id(&self) -> ResourceId {
        let mut state = self.lock();
        state.next_id += 1;
        state.next_id
    }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.begin("list_services".to_string()).await?;
        let scripted = self.lock().scripted_services.pop_front();
        match scripted {
            Some((delay, services)) => {
                tokio::time::sleep(delay).await;
                Ok(services)
            }
            None => Ok(self.lock().services.clone()),
        }
    }

    async fn create_service(&self, draft: &ServiceDraft) -> Result<Service, ApiError> {
        self.begin("create_service".to_string()).await?;
        let service = Service {
            id: self.next_id(),
            name: draft.name.clone(),
            protocol: draft.protocol,
            base_url: draft.base_url.clone(),
            grpc_address: draft.grpc_address.clone(),
            ..Default::default()
        };
        self.lock().services.push(service.clone());
        Ok(service)
    }

    async fn update_service(
        &self,
        id: ResourceId,
        draft: &ServiceDraft,
    ) -> Result<Service, ApiError> {
        self.begin(format!("update_service:{}", id)).await?;
        let service = Service {
            id,
            name: draft.name.clone(),
            protocol: draft.protocol,
            base_url: draft.base_url.clone(),
            grpc_address: draft.grpc_address.clone(),
            ..Default::default()
        };
        let mut state = self.lock();
        if let Some(existing) = state.services.iter_mut().find(|s| s.id == id) {
            *existing = service.clone();
        }
        Ok(service)
    }

    async fn delete_service(&self, id: ResourceId) -> Result<(), ApiError> {
        self.begin(format!("delete_service:{}", id)).await?;
        self.lock().services.retain(|s| s.id != id);
        Ok(())
    }

    async fn list_routes(&self) -> Result<Vec<Route>, ApiError> {
        self.begin("list_routes".to_string()).await?;
        Ok(self.lock().routes.clone())
    }

    async fn create_route(&self, draft: &RouteDraft) -> Result<Route, ApiError> {
        self.begin("create_route".to_string()).await?;
        let route = Route {
            id: self.next_id(),
            path: draft.path.clone(),
            method: draft.method.clone(),
            service_id: draft.service_id.unwrap_or_default(),
            endpoint_filter: draft.endpoint_filter.clone(),
            tag: draft.tag.clone(),
            ..Default::default()
        };
        self.lock().routes.push(route.clone());
        Ok(route)
    }

    async fn update_route(&self, id: ResourceId, draft: &RouteDraft) -> Result<Route, ApiError> {
        self.begin(format!("update_route:{}", id)).await?;
        Ok(Route {
            id,
            path: draft.path.clone(),
            method: draft.method.clone(),
            service_id: draft.service_id.unwrap_or_default(),
            endpoint_filter: draft.endpoint_filter.clone(),
            tag: draft.tag.clone(),
            ..Default::default()
        })
    }

    async fn delete_route(&self, id: ResourceId) -> Result<(), ApiError> {
        self.begin(format!("delete_route:{}", id)).await?;
        self.lock().routes.retain(|r| r.id != id);
        Ok(())
    }

    async fn list_proto_mappings(&self) -> Result<Vec<ProtoMapping>, ApiError> {
        self.begin("list_proto_mappings".to_string()).await?;
        Ok(self.lock().proto_mappings.clone())
    }

    async fn create_proto_mapping(
        &self,
        draft: &ProtoMappingDraft,
    ) -> Result<ProtoMapping, ApiError> {
        self.begin("create_proto_mapping".to_string()).await?;
        let mapping = ProtoMapping {
            id: self.next_id(),
            service_id: draft.service_id.unwrap_or_default(),
            rpc_method: draft.rpc_method.clone(),
            grpc_service_name: draft.grpc_service_name.clone(),
            proto_package: draft.proto_package.clone(),
            request_type: draft.request_type.clone(),
            response_type: draft.response_type.clone(),
            ..Default::default()
        };
        self.lock().proto_mappings.push(mapping.clone());
        Ok(mapping)
    }

    async fn update_proto_mapping(
        &self,
        id: ResourceId,
        draft: &ProtoMappingDraft,
    ) -> Result<ProtoMapping, ApiError> {
        self.begin(format!("update_proto_mapping:{}", id)).await?;
        Ok(ProtoMapping {
            id,
            service_id: draft.service_id.unwrap_or_default(),
            rpc_method: draft.rpc_method.clone(),
            ..Default::default()
        })
    }

    async fn delete_proto_mapping(&self, id: ResourceId) -> Result<(), ApiError> {
        self.begin(format!("delete_proto_mapping:{}", id)).await?;
        self.lock().proto_mappings.retain(|m| m.id != id);
        Ok(())
    }

    async fn metrics(&self) -> Result<MetricsSnapshot, ApiError> {
        self.begin("metrics".to_string()).await?;
        let scripted = self.lock().scripted_metrics.pop_front();
        match scripted {
            Some((delay, metrics)) => {
                tokio::time::sleep(delay).await;
                Ok(metrics)
            }
            None => Ok(self.lock().metrics.clone()),
        }
    }

    async fn activity_logs(&self) -> Result<Vec<ActivityLogEntry>, ApiError> {
        self.begin("activity_logs".to_string()).await?;
        Ok(self.lock().activity.clone())
    }

    async fn request_logs(&self) -> Result<Vec<RequestLogEntry>, ApiError> {
        self.begin("request_logs".to_string()).await?;
        Ok(self.lock().requests.clone())
    }

    async fn server_logs(&self) -> Result<Vec<ServerLogEntry>, ApiError> {
        self.begin("server_logs".to_string()).await?;
        Ok(self.lock().server_log.clone())
    }

    async fn traces(&self, request_id: &str) -> Result<Vec<TraceEntry>, ApiError> {
        self.begin(format!("traces:{}", request_id)).await?;
        Ok(self
            .lock()
            .traces
            .get(request_id)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn service(id: ResourceId, name: &str, protocol: Protocol) -> Service {
    Service {
        id,
        name: name.to_string(),
        protocol,
        base_url: match protocol {
            Protocol::Rest => format!("http://{}:8080", name),
            Protocol::Grpc => String::new(),
        },
        grpc_address: match protocol {
            Protocol::Rest => String::new(),
            Protocol::Grpc => format!("{}:9090", name),
        },
        ..Default::default()
    }
}

pub fn route(id: ResourceId, path: &str, method: &str, service_id: ResourceId) -> Route {
    Route {
        id,
        path: path.to_string(),
        method: method.to_string(),
        service_id,
        endpoint_filter: path.to_string(),
        ..Default::default()
    }
}

pub fn request(id: ResourceId, request_id: &str, path: &str, status: u16) -> RequestLogEntry {
    RequestLogEntry {
        id,
        request_id: request_id.to_string(),
        method: "GET".to_string(),
        path: path.to_string(),
        status_code: status,
        latency_ms: 12,
        ..Default::default()
    }
}

/// Metrics where `name` has served `requests` requests
pub fn metrics_for(name: &str, requests: u64) -> MetricsSnapshot {
    let mut snapshot = MetricsSnapshot::default();
    snapshot.services.insert(
        name.to_string(),
        ServiceMetrics {
            total_requests: requests,
            health_score: 100,
            circuit_status: "CLOSED".to_string(),
            ..Default::default()
        },
    );
    snapshot
}
