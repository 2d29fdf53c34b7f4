//! Resource store
//!
//! Holds the console's authoritative copy of every remote collection. A
//! refresh issues one fetch per collection the active view depends on; each
//! fetch writes its collection as soon as it settles. The store is cheap to
//! clone and shared between the UI loop and background tasks.

pub mod view;

pub use view::{Collection, ConsoleView};

use crate::api::{AdminApi, ApiError};
use crate::models::{
    ActivityLogEntry, MetricsSnapshot, ProtoMapping, RequestLogEntry, Route, ServerLogEntry,
    Service,
};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::task::JoinHandle;

/// Default rolling window for the server console
pub const DEFAULT_SERVER_LOG_CAPACITY: usize = 1000;

/// Snapshot of every mirrored collection
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub services: Vec<Service>,
    pub routes: Vec<Route>,
    pub proto_mappings: Vec<ProtoMapping>,
    pub activity_log: Vec<ActivityLogEntry>,
    pub traffic_log: Vec<RequestLogEntry>,
    pub server_log: Vec<ServerLogEntry>,
    pub metrics: MetricsSnapshot,
}

impl Collections {
    /// Number of entries held for `collection` (services for metrics)
    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::Services => self.services.len(),
            Collection::Routes => self.routes.len(),
            Collection::ProtoMappings => self.proto_mappings.len(),
            Collection::ActivityLog => self.activity_log.len(),
            Collection::TrafficLog => self.traffic_log.len(),
            Collection::ServerLog => self.server_log.len(),
            Collection::Metrics => self.metrics.services.len(),
        }
    }
}

/// Outcome of one refresh call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub succeeded: Vec<Collection>,
    pub failed: Vec<(Collection, ApiError)>,
}

impl RefreshReport {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn error_for(&self, collection: Collection) -> Option<&ApiError> {
        self.failed
            .iter()
            .find(|(c, _)| *c == collection)
            .map(|(_, e)| e)
    }
}

/// A fetched payload waiting to be written
enum Fetched {
    Services(Vec<Service>),
    Routes(Vec<Route>),
    ProtoMappings(Vec<ProtoMapping>),
    ActivityLog(Vec<ActivityLogEntry>),
    TrafficLog(Vec<RequestLogEntry>),
    ServerLog(Vec<ServerLogEntry>),
    Metrics(MetricsSnapshot),
}

async fn fetch(api: &dyn AdminApi, collection: Collection) -> Result<Fetched, ApiError> {
    Ok(match collection {
        Collection::Services => Fetched::Services(api.list_services().await?),
        Collection::Routes => Fetched::Routes(api.list_routes().await?),
        Collection::ProtoMappings => Fetched::ProtoMappings(api.list_proto_mappings().await?),
        Collection::ActivityLog => Fetched::ActivityLog(api.activity_logs().await?),
        Collection::TrafficLog => Fetched::TrafficLog(api.request_logs().await?),
        Collection::ServerLog => Fetched::ServerLog(api.server_logs().await?),
        Collection::Metrics => Fetched::Metrics(api.metrics().await?),
    })
}

#[derive(Default)]
struct Inner {
    data: Collections,
    /// Sequence of the last applied response per collection
    applied: HashMap<Collection, u64>,
}

/// Keeps the store's loading flag raised while alive
pub struct LoadingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingGuard {
    fn new(in_flight: &Arc<AtomicUsize>) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            in_flight: Arc::clone(in_flight),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Thread-safe store of every collection the console displays
#[derive(Clone)]
pub struct ResourceStore {
    inner: Arc<RwLock<Inner>>,
    in_flight: Arc<AtomicUsize>,
    sequence: Arc<AtomicU64>,
    coalesce: bool,
    server_log_capacity: usize,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            sequence: Arc::new(AtomicU64::new(0)),
            coalesce: false,
            server_log_capacity: DEFAULT_SERVER_LOG_CAPACITY,
        }
    }

    /// Discard responses issued before the last applied one for the same collection
    pub fn with_coalescing(mut self, coalesce: bool) -> Self {
        self.coalesce = coalesce;
        self
    }

    pub fn with_server_log_capacity(mut self, capacity: usize) -> Self {
        self.server_log_capacity = capacity.max(1);
        self
    }

    /// Store pre-populated with `data`, for headless rendering and tests
    pub fn seeded(data: Collections) -> Self {
        let store = Self::new();
        store.write().data = data;
        store
    }

    pub fn coalescing(&self) -> bool {
        self.coalesce
    }

    /// True while any refresh issued through this store is unsettled
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Raise the loading flag until the returned guard is dropped
    pub fn begin_loading(&self) -> LoadingGuard {
        LoadingGuard::new(&self.in_flight)
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the current collections under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        f(&self.read_lock().data)
    }

    pub fn snapshot(&self) -> Collections {
        self.read(Clone::clone)
    }

    pub fn services(&self) -> Vec<Service> {
        self.read(|c| c.services.clone())
    }

    pub fn routes(&self) -> Vec<Route> {
        self.read(|c| c.routes.clone())
    }

    pub fn proto_mappings(&self) -> Vec<ProtoMapping> {
        self.read(|c| c.proto_mappings.clone())
    }

    pub fn activity_log(&self) -> Vec<ActivityLogEntry> {
        self.read(|c| c.activity_log.clone())
    }

    pub fn traffic_log(&self) -> Vec<RequestLogEntry> {
        self.read(|c| c.traffic_log.clone())
    }

    pub fn server_log(&self) -> Vec<ServerLogEntry> {
        self.read(|c| c.server_log.clone())
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.read(|c| c.metrics.clone())
    }

    /// Refresh every collection `view` depends on
    pub async fn refresh(&self, api: &dyn AdminApi, view: ConsoleView) -> RefreshReport {
        tracing::debug!("Refreshing view: {}", view);
        self.refresh_collections(api, view.dependencies()).await
    }

    /// Fetch `collections` concurrently, writing each as it settles
    ///
    /// A failed fetch leaves its collection untouched and does not affect
    /// the others.
    pub async fn refresh_collections(
        &self,
        api: &dyn AdminApi,
        collections: &[Collection],
    ) -> RefreshReport {
        let issued = self.issue(collections);
        self.run_issued(api, issued).await
    }

    /// Refresh `collections` on a background task
    ///
    /// Loading is raised and sequence numbers are reserved before this
    /// returns, so refreshes are ordered by call, not by when their task runs.
    pub fn spawn_refresh(
        &self,
        api: Arc<dyn AdminApi>,
        collections: &[Collection],
    ) -> JoinHandle<RefreshReport> {
        let store = self.clone();
        let issued = self.issue(collections);
        let guard = self.begin_loading();
        tokio::spawn(async move {
            let report = store.run_issued(api.as_ref(), issued).await;
            drop(guard);
            report
        })
    }

    /// Stamp each collection with the next issuance sequence number
    fn issue(&self, collections: &[Collection]) -> Vec<(Collection, u64)> {
        collections
            .iter()
            .map(|&c| (c, self.sequence.fetch_add(1, Ordering::SeqCst) + 1))
            .collect()
    }

    async fn run_issued(
        &self,
        api: &dyn AdminApi,
        issued: Vec<(Collection, u64)>,
    ) -> RefreshReport {
        let _loading = self.begin_loading();

        let fetches = issued.into_iter().map(|(collection, seq)| async move {
            match fetch(api, collection).await {
                Ok(fetched) => {
                    self.apply(collection, seq, fetched);
                    (collection, Ok(()))
                }
                Err(e) => {
                    tracing::warn!("Failed to refresh {}: {}", collection, e);
                    (collection, Err(e))
                }
            }
        });

        let mut report = RefreshReport::default();
        for (collection, outcome) in join_all(fetches).await {
            match outcome {
                Ok(()) => report.succeeded.push(collection),
                Err(e) => report.failed.push((collection, e)),
            }
        }
        report
    }

    fn apply(&self, collection: Collection, issued: u64, fetched: Fetched) {
        let mut inner = self.write();

        if self.coalesce {
            let last = inner.applied.get(&collection).copied().unwrap_or(0);
            if issued < last {
                tracing::debug!(
                    "Discarding stale {} response (issued {}, applied {})",
                    collection,
                    issued,
                    last
                );
                return;
            }
        }
        inner.applied.insert(collection, issued);

        let data = &mut inner.data;
        match fetched {
            Fetched::Services(v) => data.services = v,
            Fetched::Routes(v) => data.routes = v,
            Fetched::ProtoMappings(v) => data.proto_mappings = v,
            Fetched::ActivityLog(v) => data.activity_log = v,
            Fetched::TrafficLog(v) => data.traffic_log = v,
            Fetched::ServerLog(mut v) => {
                if v.len() > self.server_log_capacity {
                    v.drain(..v.len() - self.server_log_capacity);
                }
                data.server_log = v;
            }
            Fetched::Metrics(v) => data.metrics = v,
        }

        tracing::debug!("Applied {} ({} entries)", collection, data.len_of(collection));
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_guard_counts_overlaps() {
        let store = ResourceStore::new();
        assert!(!store.is_loading());
        let first = store.begin_loading();
        let second = store.begin_loading();
        drop(first);
        assert!(store.is_loading());
        drop(second);
        assert!(!store.is_loading());
    }

    #[test]
    fn test_server_log_keeps_newest() {
        let store = ResourceStore::new().with_server_log_capacity(2);
        let lines = (0..5)
            .map(|i| ServerLogEntry {
                timestamp: None,
                message: format!("line {}", i),
            })
            .collect();
        store.apply(Collection::ServerLog, 1, Fetched::ServerLog(lines));
        let kept: Vec<_> = store.server_log().into_iter().map(|e| e.message).collect();
        assert_eq!(kept, vec!["line 3", "line 4"]);
    }

    #[test]
    fn test_coalescing_discards_older_issue() {
        let store = ResourceStore::new().with_coalescing(true);
        let named = |name: &str| {
            Fetched::Services(vec![Service {
                name: name.to_string(),
                ..Default::default()
            }])
        };
        store.apply(Collection::Services, 2, named("newer"));
        store.apply(Collection::Services, 1, named("older"));
        assert_eq!(store.services()[0].name, "newer");
    }

    #[test]
    fn test_without_coalescing_last_write_wins() {
        let store = ResourceStore::new();
        let named = |name: &str| {
            Fetched::Services(vec![Service {
                name: name.to_string(),
                ..Default::default()
            }])
        };
        store.apply(Collection::Services, 2, named("newer"));
        store.apply(Collection::Services, 1, named("older"));
        assert_eq!(store.services()[0].name, "older");
    }

    #[tokio::test]
    async fn test_issue_order_decides_with_coalescing() {
        use crate::api::MockAdminApi;

        let mut mock = MockAdminApi::new();
        let mut calls = 0;
        mock.expect_list_services().times(2).returning(move || {
            calls += 1;
            let name = if calls == 1 { "second issued" } else { "first issued" };
            Ok(vec![Service {
                name: name.to_string(),
                ..Default::default()
            }])
        });

        let store = ResourceStore::new().with_coalescing(true);
        let first = store.issue(&[Collection::Services]);
        let second = store.issue(&[Collection::Services]);
        assert!(store.run_issued(&mock, second).await.is_ok());
        assert!(store.run_issued(&mock, first).await.is_ok());
        assert_eq!(store.services()[0].name, "second issued");
    }

    #[tokio::test]
    async fn test_spawn_refresh_reserves_sequence_before_running() {
        let mut mock = crate::api::MockAdminApi::new();
        mock.expect_list_services().returning(|| Ok(Vec::new()));
        let api: Arc<dyn AdminApi> = Arc::new(mock);

        let store = ResourceStore::new().with_coalescing(true);
        let handle = store.spawn_refresh(api, &[Collection::Services]);
        assert_eq!(store.sequence.load(Ordering::SeqCst), 1);
        assert!(store.is_loading());
        assert!(handle.await.unwrap().is_ok());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_seeded_store() {
        let store = ResourceStore::seeded(Collections {
            routes: vec![Route::default()],
            ..Default::default()
        });
        assert_eq!(store.read(|c| c.len_of(Collection::Routes)), 1);
    }
}
