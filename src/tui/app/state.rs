//! Application state structures
//!
//! Sub-structures grouping the App's fields by concern.

use crate::api::ApiError;
use crate::crud::{DeleteOutcome, DeleteTarget};
use crate::listing::{Listing, ViewState, category_values};
use crate::models::{
    ActivityLogEntry, ProtoMapping, RequestLogEntry, Route, SavedRecord, ServerLogEntry, Service,
    TraceEntry,
};
use crate::store::{ConsoleView, RefreshReport};
use std::time::Instant;
use tokio::sync::oneshot;

/// Result delivered from a background task to the event loop
#[derive(Debug)]
pub enum ConsoleEvent {
    Refreshed(ConsoleView, RefreshReport),
    Saved(Result<SavedRecord, ApiError>),
    Deleted(DeleteTarget, DeleteOutcome),
    /// Timeline fetched for the given trace generation
    Trace(u64, Vec<TraceEntry>),
}

/// One view state per listing the console shows
#[derive(Debug, Clone)]
pub struct Listings {
    pub services: ViewState<Service>,
    pub routes: ViewState<Route>,
    pub proto_mappings: ViewState<ProtoMapping>,
    pub traffic: ViewState<RequestLogEntry>,
    pub activity: ViewState<ActivityLogEntry>,
    pub server_log: ViewState<ServerLogEntry>,
}

impl Listings {
    pub fn new(page_size: usize) -> Self {
        Self {
            services: ViewState::new(page_size),
            routes: ViewState::new(page_size),
            proto_mappings: ViewState::new(page_size),
            traffic: ViewState::new(page_size),
            activity: ViewState::new(page_size),
            // The console shows a longer window per page
            server_log: ViewState::new(page_size * 5),
        }
    }
}

/// Operations the event loop applies to whichever listing is active
pub trait ListingControl {
    fn search(&self) -> &str;
    fn set_search(&mut self, text: String);
    fn cycle_sort(&mut self);
    fn toggle_direction(&mut self);
    fn page(&self) -> usize;
    fn set_page(&mut self, page: usize);
    fn prev_page(&mut self) -> bool;
    fn next_page(&mut self, total_pages: usize) -> bool;
}

impl<T: Listing> ListingControl for ViewState<T> {
    fn search(&self) -> &str {
        ViewState::search(self)
    }

    fn set_search(&mut self, text: String) {
        ViewState::set_search(self, text);
    }

    fn cycle_sort(&mut self) {
        ViewState::cycle_sort(self);
    }

    fn toggle_direction(&mut self) {
        ViewState::toggle_direction(self);
    }

    fn page(&self) -> usize {
        ViewState::page(self)
    }

    fn set_page(&mut self, page: usize) {
        ViewState::set_page(self, page);
    }

    fn prev_page(&mut self) -> bool {
        ViewState::prev_page(self)
    }

    fn next_page(&mut self, total_pages: usize) -> bool {
        ViewState::next_page(self, total_pages)
    }
}

/// Advance the category filter of `state` to the next value present in `source`
pub fn cycle_category<T: Listing>(state: &mut ViewState<T>, source: &[T]) {
    let options = category_values(source);
    let next = state.category().cycle(&options);
    state.set_category(next);
}

/// (rows on the current page, total pages) for `state` over `source`
pub fn page_info<T: Listing>(state: &ViewState<T>, source: &[T]) -> (usize, usize) {
    let view = state.derive(source);
    (view.rows.len(), view.total_pages)
}

/// Selection and input state
#[derive(Debug, Default)]
pub struct UIState {
    /// Selected row within the current page
    pub selected_index: usize,
    /// Whether the operator is typing a search
    pub search_mode: bool,
    /// Status message to display (message, is_error)
    pub status_message: Option<(String, bool)>,
    /// When the status message was set (for auto-clearing)
    pub status_message_time: Option<Instant>,
    /// Focused field index in the resource form
    pub form_focus: usize,
}

/// A delete waiting for the operator's answer
#[derive(Debug)]
pub struct PendingDelete {
    pub target: DeleteTarget,
    pub answer: oneshot::Sender<bool>,
}
