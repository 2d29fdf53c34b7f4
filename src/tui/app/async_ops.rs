//! Async operation management
//!
//! Starts submits, deletes, trace fetches and refreshes on background tasks
//! and applies their results when they come back through the event channel.

use super::core::App;
use super::state::{ConsoleEvent, PendingDelete};
use crate::crud::{ChannelConfirmer, DeleteOutcome, delete_with_confirmation};
use crate::trace::fetch_timeline;
use std::sync::Arc;

impl App {
    /// Validate the open form and send it
    ///
    /// A validation failure keeps the form open with its error and sends
    /// nothing.
    pub fn trigger_submit(&mut self) {
        let request = match self.crud.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Submit blocked: {}", e);
                return;
            }
        };

        let api = Arc::clone(self.session.api());
        let tx = self.events_tx.clone();
        self.spawn_task(async move {
            let result = request.execute(api.as_ref()).await;
            let _ = tx.send(ConsoleEvent::Saved(result));
        });
    }

    /// Ask to delete the selected record
    ///
    /// The delete flow runs right away and waits on the operator's answer,
    /// which the confirmation keys deliver through `confirmation_pending`.
    pub fn trigger_delete(&mut self) {
        let Some(target) = self.selected_delete_target() else {
            return;
        };
        if self.confirmation_pending.is_some() {
            return;
        }

        let (answer, confirmer) = ChannelConfirmer::channel();
        let api = Arc::clone(self.session.api());
        let store = self.session.store().clone();
        let view = self.view();
        let tx = self.events_tx.clone();
        let flow_target = target.clone();

        self.spawn_task(async move {
            let outcome =
                delete_with_confirmation(api.as_ref(), &store, view, &flow_target, &confirmer)
                    .await;
            let _ = tx.send(ConsoleEvent::Deleted(flow_target, outcome));
        });

        self.confirmation_pending = Some(PendingDelete { target, answer });
    }

    /// Answer the pending delete prompt
    pub fn answer_confirmation(&mut self, confirmed: bool) {
        if let Some(pending) = self.confirmation_pending.take() {
            tracing::debug!(
                "Delete of {} {} {}",
                pending.target.kind,
                pending.target.id,
                if confirmed { "confirmed" } else { "declined" }
            );
            let _ = pending.answer.send(confirmed);
        }
    }

    /// Open the trace timeline of the selected request
    pub fn trigger_trace(&mut self) {
        let Some(request) = self.selected_request() else {
            return;
        };
        if request.request_id.is_empty() {
            self.set_status_message(("Request has no trace id".to_string(), true));
            return;
        }

        let request_id = request.request_id;
        let generation = self.trace.open(request_id.clone());

        let api = Arc::clone(self.session.api());
        let tx = self.events_tx.clone();
        self.spawn_task(async move {
            let entries = fetch_timeline(api.as_ref(), &request_id).await;
            let _ = tx.send(ConsoleEvent::Trace(generation, entries));
        });
    }

    /// Apply every result that has arrived; returns how many were applied
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        if applied > 0 {
            self.clamp_selection();
        }
        applied
    }

    pub(crate) fn apply_event(&mut self, event: ConsoleEvent) {
        match event {
            ConsoleEvent::Refreshed(view, report) => {
                if let Some((collection, e)) = report.failed.first() {
                    self.set_status_message((
                        format!("Failed to load {} for {}: {}", collection, view, e.summary()),
                        true,
                    ));
                }
            }
            ConsoleEvent::Saved(result) => match self.crud.finish_submit(result) {
                Ok(record) => {
                    self.set_status_message((
                        format!(
                            "Saved {} '{}'",
                            record.kind().display_name(),
                            record.label()
                        ),
                        false,
                    ));
                    self.ui_state.form_focus = 0;
                    self.spawn_refresh();
                }
                Err(e) => tracing::debug!("Submit failed: {}", e),
            },
            ConsoleEvent::Deleted(target, outcome) => match outcome {
                DeleteOutcome::Deleted => {
                    self.set_status_message((
                        format!("Deleted {} '{}'", target.kind.display_name(), target.label),
                        false,
                    ));
                }
                DeleteOutcome::Failed(e) => {
                    self.set_status_message((
                        format!("Delete failed: {}", e.summary()),
                        true,
                    ));
                }
                DeleteOutcome::Declined => {}
            },
            ConsoleEvent::Trace(generation, entries) => {
                self.trace.complete(generation, entries);
            }
        }
    }
}
