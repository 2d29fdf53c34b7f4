//! Headless console session for library consumers
//!
//! `ConsoleSession` wraps an admin API client, the resource store and the
//! console poller into a single object usable without any TUI dependencies.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::api::{AdminApi, HttpAdminClient};
use crate::config::schema::Config;
use crate::poller::{ConsolePoller, PollIntervals};
use crate::store::{ConsoleView, RefreshReport, ResourceStore};

/// A session connected to one gateway admin API
///
/// # Example
///
/// ```rust,no_run
/// use gate9s::config::schema::Config;
/// use gate9s::services::ConsoleSession;
/// use gate9s::store::ConsoleView;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::default();
/// let mut session = ConsoleSession::connect(&config)?;
///
/// session.set_view(ConsoleView::Routes).await;
/// for route in session.store().routes() {
///     println!("{} {}", route.method, route.path);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ConsoleSession {
    api: Arc<dyn AdminApi>,
    store: ResourceStore,
    poller: ConsolePoller,
    view: ConsoleView,
}

impl ConsoleSession {
    /// Build an HTTP client and store from configuration
    pub fn connect(config: &Config) -> Result<Self> {
        let client = HttpAdminClient::new(&config.gateway.base_url, config.timeout()?)
            .with_context(|| format!("Failed to create client for {}", config.gateway.base_url))?;

        let store = ResourceStore::new()
            .with_coalescing(config.refresh.coalesce)
            .with_server_log_capacity(config.logger.buffer);

        Ok(Self::with_api(
            Arc::new(client),
            store,
            config.poll_intervals()?,
            config.default_view()?,
        ))
    }

    /// Assemble a session around an existing client
    pub fn with_api(
        api: Arc<dyn AdminApi>,
        store: ResourceStore,
        intervals: PollIntervals,
        view: ConsoleView,
    ) -> Self {
        let poller = ConsolePoller::new(Arc::clone(&api), store.clone(), intervals);
        Self {
            api,
            store,
            poller,
            view,
        }
    }

    /// Start the timers and load the current view plus metrics
    pub async fn mount(&mut self) -> RefreshReport {
        tracing::info!("Mounting console on view: {}", self.view);
        self.poller.mount(self.view);

        let mut collections = self.view.dependencies().to_vec();
        collections.push(crate::store::Collection::Metrics);
        self.store
            .refresh_collections(self.api.as_ref(), &collections)
            .await
    }

    /// Stop all timers
    pub fn unmount(&mut self) {
        tracing::debug!("Unmounting console");
        self.poller.unmount();
    }

    /// Switch views and refresh what the new view depends on
    pub async fn set_view(&mut self, view: ConsoleView) -> RefreshReport {
        self.select_view(view);
        self.refresh().await
    }

    /// Switch views and retarget the timers without refreshing
    ///
    /// Front ends that refresh on a background task call this first.
    pub fn select_view(&mut self, view: ConsoleView) {
        if view != self.view {
            tracing::debug!("View changed: {} -> {}", self.view, view);
        }
        self.view = view;
        if self.poller.is_mounted() {
            self.poller.on_view_changed(view);
        }
    }

    /// Refresh the active view's collections
    pub async fn refresh(&self) -> RefreshReport {
        self.store.refresh(self.api.as_ref(), self.view).await
    }

    pub fn api(&self) -> &Arc<dyn AdminApi> {
        &self.api
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub fn poller(&self) -> &ConsolePoller {
        &self.poller
    }

    pub fn view(&self) -> ConsoleView {
        self.view
    }
}

impl Drop for ConsoleSession {
    fn drop(&mut self) {
        self.poller.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAdminApi;
    use crate::models::{MetricsSnapshot, Route};

    fn route(path: &str) -> Route {
        Route {
            id: 1,
            path: path.to_string(),
            method: "GET".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mount_loads_view_and_metrics() {
        let mut mock = MockAdminApi::new();
        mock.expect_list_routes()
            .times(1)
            .returning(|| Ok(vec![route("/v1/auth")]));
        mock.expect_list_services().times(1).returning(|| Ok(Vec::new()));
        mock.expect_metrics()
            .times(1)
            .returning(|| Ok(MetricsSnapshot::default()));

        let mut session = ConsoleSession::with_api(
            Arc::new(mock),
            ResourceStore::new(),
            PollIntervals::default(),
            ConsoleView::Routes,
        );
        let report = session.mount().await;

        assert!(report.is_ok());
        assert_eq!(session.store().routes().len(), 1);
        assert!(session.poller().is_mounted());
        assert!(!session.poller().server_log_active());

        session.unmount();
        assert!(!session.poller().is_mounted());
    }

    #[tokio::test]
    async fn test_view_switch_drives_server_log_timer() {
        let mut mock = MockAdminApi::new();
        mock.expect_server_logs().returning(|| Ok(Vec::new()));
        mock.expect_metrics()
            .returning(|| Ok(MetricsSnapshot::default()));
        mock.expect_request_logs().returning(|| Ok(Vec::new()));

        let mut session = ConsoleSession::with_api(
            Arc::new(mock),
            ResourceStore::new(),
            PollIntervals::default(),
            ConsoleView::Traffic,
        );
        session.mount().await;

        session.set_view(ConsoleView::SystemLogs).await;
        assert!(session.poller().server_log_active());

        session.set_view(ConsoleView::Traffic).await;
        assert!(!session.poller().server_log_active());
    }

    #[test]
    fn test_connect_rejects_bad_base_url() {
        let mut config = Config::default();
        config.gateway.base_url = "ftp://gateway".to_string();
        assert!(ConsoleSession::connect(&config).is_err());
    }

    #[test]
    fn test_connect_carries_coalescing_setting() {
        let mut config = Config::default();
        assert!(!ConsoleSession::connect(&config).unwrap().store().coalescing());
        config.refresh.coalesce = true;
        assert!(ConsoleSession::connect(&config).unwrap().store().coalescing());
    }
}
