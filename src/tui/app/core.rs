//! Application state and main TUI logic

use super::state::{
    ConsoleEvent, ListingControl, Listings, PendingDelete, UIState, cycle_category, page_info,
};
use crate::config::Config;
use crate::crud::{CrudController, DeleteTarget};
use crate::models::{ProtoMapping, RequestLogEntry, ResourceDraft, Route, Service};
use crate::services::ConsoleSession;
use crate::store::{Collections, ConsoleView};
use crate::trace::TraceViewer;
use crate::tui::Theme;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Main application state
pub struct App {
    // Core data
    pub(crate) session: ConsoleSession,
    pub(crate) config: Config,
    pub(crate) theme: Theme,

    // Organized state
    pub(crate) listings: Listings,
    pub(crate) ui_state: UIState,
    pub(crate) crud: CrudController,
    pub(crate) trace: TraceViewer,
    pub(crate) confirmation_pending: Option<PendingDelete>,

    // Background work
    pub(crate) tasks: JoinSet<()>,
    pub(crate) events_tx: mpsc::UnboundedSender<ConsoleEvent>,
    pub(crate) events_rx: mpsc::UnboundedReceiver<ConsoleEvent>,
}

impl App {
    pub fn new(session: ConsoleSession, config: Config, theme: Theme) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            listings: Listings::new(config.ui.page_size),
            session,
            config,
            theme,
            ui_state: UIState::default(),
            crud: CrudController::new(),
            trace: TraceViewer::new(),
            confirmation_pending: None,
            tasks: JoinSet::new(),
            events_tx,
            events_rx,
        }
    }

    pub fn view(&self) -> ConsoleView {
        self.session.view()
    }

    pub fn session(&self) -> &ConsoleSession {
        &self.session
    }

    pub fn listings(&self) -> &Listings {
        &self.listings
    }

    pub fn crud(&self) -> &CrudController {
        &self.crud
    }

    pub fn trace(&self) -> &TraceViewer {
        &self.trace
    }

    pub fn selected_index(&self) -> usize {
        self.ui_state.selected_index
    }

    pub fn is_search_mode(&self) -> bool {
        self.ui_state.search_mode
    }

    pub fn is_confirming(&self) -> bool {
        self.confirmation_pending.is_some()
    }

    pub fn form_focus(&self) -> usize {
        self.ui_state.form_focus
    }

    pub fn status_message(&self) -> Option<&(String, bool)> {
        self.ui_state.status_message.as_ref()
    }

    pub fn set_status_message(&mut self, message: (String, bool)) {
        self.ui_state.status_message = Some(message);
        self.ui_state.status_message_time = Some(std::time::Instant::now());
    }

    /// Clear the status message once it has been shown long enough
    pub fn check_status_message_timeout(&mut self) {
        use crate::tui::constants::STATUS_MESSAGE_TIMEOUT_SECS;
        if let Some(set_at) = self.ui_state.status_message_time {
            if set_at.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.ui_state.status_message = None;
                self.ui_state.status_message_time = None;
            }
        }
    }

    /// Listing driven by the keyboard in the active view
    pub(crate) fn active_listing(&mut self) -> &mut dyn ListingControl {
        match self.view() {
            ConsoleView::Overview => &mut self.listings.activity,
            ConsoleView::Services => &mut self.listings.services,
            ConsoleView::Routes => &mut self.listings.routes,
            ConsoleView::ProtoMappings => &mut self.listings.proto_mappings,
            ConsoleView::Traffic => &mut self.listings.traffic,
            ConsoleView::SystemLogs => &mut self.listings.server_log,
        }
    }

    /// (rows on the current page, total pages) of the active listing
    pub(crate) fn active_page_info(&self) -> (usize, usize) {
        let l = &self.listings;
        self.session.store().read(|c| match self.view() {
            ConsoleView::Overview => page_info(&l.activity, &c.activity_log),
            ConsoleView::Services => page_info(&l.services, &c.services),
            ConsoleView::Routes => page_info(&l.routes, &c.routes),
            ConsoleView::ProtoMappings => page_info(&l.proto_mappings, &c.proto_mappings),
            ConsoleView::Traffic => page_info(&l.traffic, &c.traffic_log),
            ConsoleView::SystemLogs => page_info(&l.server_log, &c.server_log),
        })
    }

    pub(crate) fn cycle_active_category(&mut self) {
        let view = self.view();
        let l = &mut self.listings;
        self.session.store().read(|c| match view {
            ConsoleView::Overview => cycle_category(&mut l.activity, &c.activity_log),
            ConsoleView::Services => cycle_category(&mut l.services, &c.services),
            ConsoleView::Routes => cycle_category(&mut l.routes, &c.routes),
            ConsoleView::ProtoMappings => {
                cycle_category(&mut l.proto_mappings, &c.proto_mappings)
            }
            ConsoleView::Traffic => cycle_category(&mut l.traffic, &c.traffic_log),
            ConsoleView::SystemLogs => {}
        });
        self.ui_state.selected_index = 0;
    }

    /// Keep the page and selection in range after data or filters change
    pub(crate) fn clamp_selection(&mut self) {
        let (_, total_pages) = self.active_page_info();
        let last_page = total_pages.max(1);
        let listing = self.active_listing();
        if listing.page() > last_page {
            listing.set_page(last_page);
        }

        let (rows, _) = self.active_page_info();
        if self.ui_state.selected_index >= rows {
            self.ui_state.selected_index = rows.saturating_sub(1);
        }
    }

    fn selected<T>(
        &self,
        pick: impl FnOnce(&Listings, &Collections, usize) -> Option<T>,
    ) -> Option<T> {
        let index = self.ui_state.selected_index;
        self.session
            .store()
            .read(|c| pick(&self.listings, c, index))
    }

    pub fn selected_service(&self) -> Option<Service> {
        self.selected(|l, c, i| l.services.derive(&c.services).rows.get(i).map(|r| (*r).clone()))
    }

    pub fn selected_route(&self) -> Option<Route> {
        self.selected(|l, c, i| l.routes.derive(&c.routes).rows.get(i).map(|r| (*r).clone()))
    }

    pub fn selected_proto_mapping(&self) -> Option<ProtoMapping> {
        self.selected(|l, c, i| {
            l.proto_mappings
                .derive(&c.proto_mappings)
                .rows
                .get(i)
                .map(|r| (*r).clone())
        })
    }

    pub fn selected_request(&self) -> Option<RequestLogEntry> {
        self.selected(|l, c, i| {
            l.traffic
                .derive(&c.traffic_log)
                .rows
                .get(i)
                .map(|r| (*r).clone())
        })
    }

    /// Draft for editing the selected record of the active resource view
    pub(crate) fn selected_draft(&self) -> Option<ResourceDraft> {
        match self.view() {
            ConsoleView::Services => self.selected_service().map(|r| (&r).into()),
            ConsoleView::Routes => self.selected_route().map(|r| (&r).into()),
            ConsoleView::ProtoMappings => self.selected_proto_mapping().map(|r| (&r).into()),
            _ => None,
        }
    }

    /// Delete target for the selected record of the active resource view
    pub(crate) fn selected_delete_target(&self) -> Option<DeleteTarget> {
        match self.view() {
            ConsoleView::Services => self.selected_service().map(|r| (&r).into()),
            ConsoleView::Routes => self.selected_route().map(|r| (&r).into()),
            ConsoleView::ProtoMappings => self.selected_proto_mapping().map(|r| (&r).into()),
            _ => None,
        }
    }

    /// Run `task` in the background, tied to the app's lifetime
    pub(crate) fn spawn_task<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Reap finished tasks so the set does not grow unbounded
        while self.tasks.try_join_next().is_some() {}
        self.tasks.spawn(task);
    }

    /// Refresh the active view on a background task
    ///
    /// Loading is raised before this returns.
    pub fn spawn_refresh(&mut self) {
        let view = self.view();
        let store = self.session.store().clone();
        let api = Arc::clone(self.session.api());
        let tx = self.events_tx.clone();
        let loading = store.begin_loading();

        self.spawn_task(async move {
            let report = store.refresh(api.as_ref(), view).await;
            drop(loading);
            let _ = tx.send(ConsoleEvent::Refreshed(view, report));
        });
    }

    /// Switch to `view`, resetting the selection and refreshing its data
    pub fn switch_view(&mut self, view: ConsoleView) {
        if view == self.view() {
            return;
        }
        self.session.select_view(view);
        self.ui_state.selected_index = 0;
        self.ui_state.search_mode = false;
        self.spawn_refresh();
    }

    /// Abort every background task
    pub fn shutdown(&mut self) {
        tracing::debug!("Aborting {} background tasks", self.tasks.len());
        self.tasks.abort_all();
        self.session.unmount();
    }
}
