//! Trace viewer state

use super::fetch_timeline;
use crate::api::AdminApi;
use crate::models::TraceEntry;

/// Timeline of the request currently being inspected
///
/// Holds its own loading flag, separate from the store's. Every open and
/// close starts a new generation; results carrying an older one are dropped,
/// even when the same request id was reopened.
#[derive(Debug, Clone, Default)]
pub struct TraceViewer {
    request_id: Option<String>,
    generation: u64,
    entries: Vec<TraceEntry>,
    loading: bool,
}

impl TraceViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start inspecting `request_id`, clearing any previous timeline
    ///
    /// Returns the generation the fetched result must be completed with.
    pub fn open(&mut self, request_id: impl Into<String>) -> u64 {
        let request_id = request_id.into();
        tracing::debug!("Opening trace for request: {}", request_id);
        self.generation += 1;
        self.request_id = Some(request_id);
        self.entries.clear();
        self.loading = true;
        self.generation
    }

    /// Store a fetched timeline; returns false when it is stale
    pub fn complete(&mut self, generation: u64, entries: Vec<TraceEntry>) -> bool {
        if self.request_id.is_none() || generation != self.generation {
            tracing::debug!(
                "Ignoring stale trace result (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.entries = entries;
        self.loading = false;
        true
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.request_id = None;
        self.entries.clear();
        self.loading = false;
    }

    /// Open `request_id` and fetch its timeline in place
    pub async fn load(&mut self, api: &dyn AdminApi, request_id: &str) {
        let generation = self.open(request_id);
        let entries = fetch_timeline(api, request_id).await;
        self.complete(generation, entries);
    }

    pub fn is_open(&self) -> bool {
        self.request_id.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Loaded and nothing was recorded
    pub fn is_empty(&self) -> bool {
        !self.loading && self.entries.is_empty()
    }
}
