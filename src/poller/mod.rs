//! Fixed-interval background refreshes
//!
//! Each timer runs on its own task and is owned by a `PollHandle`. Stopping
//! or dropping the handle aborts the timer together with any refresh it
//! still has in flight.

use crate::api::AdminApi;
use crate::store::{Collection, ConsoleView, ResourceStore};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, interval_at};

/// Default period of the metrics timer
pub const DEFAULT_METRICS_INTERVAL: Duration = Duration::from_secs(20);

/// Default period of the server console timer
pub const DEFAULT_SERVER_LOG_INTERVAL: Duration = Duration::from_secs(5);

const MIN_PERIOD: Duration = Duration::from_millis(10);

/// Owner of one running timer
pub struct PollHandle {
    name: &'static str,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Abort the timer and its in-flight ticks
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            tracing::debug!("Stopping poller: {}", self.name);
            task.abort();
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Call `tick` every `period`, starting one period from now
///
/// Every tick spawns its own future, so a slow tick never delays or
/// swallows the next one.
pub fn spawn_poller<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let period = period.max(MIN_PERIOD);
    tracing::debug!("Starting poller: {} (every {:?})", name, period);

    let task = tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    in_flight.spawn(tick());
                }
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }
    });

    PollHandle {
        name,
        task: Some(task),
    }
}

/// Timer periods for the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub metrics: Duration,
    pub server_log: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            metrics: DEFAULT_METRICS_INTERVAL,
            server_log: DEFAULT_SERVER_LOG_INTERVAL,
        }
    }
}

/// The console's two timers
///
/// Metrics refresh while the console is mounted. The server console only
/// refreshes while the system-log view is active.
pub struct ConsolePoller {
    api: Arc<dyn AdminApi>,
    store: ResourceStore,
    intervals: PollIntervals,
    metrics: Option<PollHandle>,
    server_log: Option<PollHandle>,
}

impl ConsolePoller {
    pub fn new(api: Arc<dyn AdminApi>, store: ResourceStore, intervals: PollIntervals) -> Self {
        Self {
            api,
            store,
            intervals,
            metrics: None,
            server_log: None,
        }
    }

    fn collection_timer(
        &self,
        name: &'static str,
        period: Duration,
        collection: Collection,
    ) -> PollHandle {
        let api = Arc::clone(&self.api);
        let store = self.store.clone();
        spawn_poller(name, period, move || {
            let api = Arc::clone(&api);
            let store = store.clone();
            async move {
                store.refresh_collections(api.as_ref(), &[collection]).await;
            }
        })
    }

    /// Start the metrics timer and the timers the initial view needs
    pub fn mount(&mut self, view: ConsoleView) {
        if self.metrics.is_none() {
            self.metrics = Some(self.collection_timer(
                "metrics",
                self.intervals.metrics,
                Collection::Metrics,
            ));
        }
        self.on_view_changed(view);
    }

    /// Start or stop the server console timer to match `view`
    pub fn on_view_changed(&mut self, view: ConsoleView) {
        if view == ConsoleView::SystemLogs {
            if self.server_log.is_none() {
                self.server_log = Some(self.collection_timer(
                    "server-log",
                    self.intervals.server_log,
                    Collection::ServerLog,
                ));
            }
        } else if let Some(mut handle) = self.server_log.take() {
            handle.stop();
        }
    }

    /// Stop every timer
    pub fn unmount(&mut self) {
        if let Some(mut handle) = self.metrics.take() {
            handle.stop();
        }
        if let Some(mut handle) = self.server_log.take() {
            handle.stop();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.metrics.is_some()
    }

    pub fn server_log_active(&self) -> bool {
        self.server_log.is_some()
    }

    pub fn intervals(&self) -> PollIntervals {
        self.intervals
    }
}
