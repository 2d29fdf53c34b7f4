//! Create/edit/delete lifecycle shared by every resource type
//!
//! One modal at a time: `Closed`, `Open` while the operator edits, and
//! `Submitting` while the mutation request is in flight. A successful submit
//! closes the modal and refreshes the store in the background; a failure
//! reopens it with the form values intact and the error attached.

pub mod delete;
pub mod form;
pub mod validation;

pub use delete::{
    AutoConfirm, ChannelConfirmer, Confirmer, DeleteOutcome, DeleteTarget,
    delete_with_confirmation,
};
pub use form::{FormField, eligible_services};
pub use validation::{ValidationError, validate};

use crate::api::{AdminApi, ApiError};
use crate::models::{ResourceDraft, ResourceKind, SavedRecord};
use crate::store::{ConsoleView, RefreshReport, ResourceStore};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum CrudError {
    #[error("a form is already open")]
    Busy,

    #[error("no form is open")]
    NotOpen,

    #[error("no submit is in progress")]
    NotSubmitting,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Draft being edited plus the last error shown with it
#[derive(Debug, Clone, PartialEq)]
pub struct ModalSession {
    pub draft: ResourceDraft,
    pub error: Option<String>,
}

impl ModalSession {
    fn new(draft: ResourceDraft) -> Self {
        Self { draft, error: None }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(ModalSession),
    Submitting(ModalSession),
}

/// A validated mutation ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub draft: ResourceDraft,
}

impl SubmitRequest {
    pub fn is_create(&self) -> bool {
        self.draft.is_new()
    }

    /// Create when the draft has no identifier, update by id otherwise
    pub async fn execute(&self, api: &dyn AdminApi) -> Result<SavedRecord, ApiError> {
        let record = match &self.draft {
            ResourceDraft::Service(d) => SavedRecord::Service(match d.id {
                None => api.create_service(d).await?,
                Some(id) => api.update_service(id, d).await?,
            }),
            ResourceDraft::Route(d) => SavedRecord::Route(match d.id {
                None => api.create_route(d).await?,
                Some(id) => api.update_route(id, d).await?,
            }),
            ResourceDraft::ProtoMapping(d) => SavedRecord::ProtoMapping(match d.id {
                None => api.create_proto_mapping(d).await?,
                Some(id) => api.update_proto_mapping(id, d).await?,
            }),
        };
        Ok(record)
    }
}

/// Modal state machine for resource forms
#[derive(Debug, Default)]
pub struct CrudController {
    state: ModalState,
}

impl CrudController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// True unless the modal is closed
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ModalState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, ModalState::Submitting(_))
    }

    pub fn session(&self) -> Option<&ModalSession> {
        match &self.state {
            ModalState::Closed => None,
            ModalState::Open(s) | ModalState::Submitting(s) => Some(s),
        }
    }

    fn open(&mut self, draft: ResourceDraft) -> Result<(), CrudError> {
        if self.is_active() {
            return Err(CrudError::Busy);
        }
        tracing::debug!(
            "Opening {} form ({})",
            draft.kind().display_name(),
            if draft.is_new() { "create" } else { "edit" }
        );
        self.state = ModalState::Open(ModalSession::new(draft));
        Ok(())
    }

    /// Open an empty form for a new record
    pub fn open_create(&mut self, kind: ResourceKind) -> Result<(), CrudError> {
        self.open(ResourceDraft::new(kind))
    }

    /// Open a form pre-filled from an existing record
    pub fn open_edit(&mut self, draft: impl Into<ResourceDraft>) -> Result<(), CrudError> {
        let draft = draft.into();
        if draft.is_new() {
            tracing::debug!("Editing a draft without identifier; submit will create");
        }
        self.open(draft)
    }

    /// Close an open form; a submit in flight cannot be cancelled
    pub fn cancel(&mut self) -> bool {
        if matches!(self.state, ModalState::Open(_)) {
            self.state = ModalState::Closed;
            true
        } else {
            false
        }
    }

    /// Mutable draft while the form is editable
    pub fn draft_mut(&mut self) -> Option<&mut ResourceDraft> {
        match &mut self.state {
            ModalState::Open(s) => Some(&mut s.draft),
            _ => None,
        }
    }

    /// Validate the open draft and move to `Submitting`
    ///
    /// A validation failure stays in `Open` with the error attached and
    /// issues no request.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, CrudError> {
        let session = match &mut self.state {
            ModalState::Open(s) => s,
            ModalState::Submitting(_) => return Err(CrudError::Busy),
            ModalState::Closed => return Err(CrudError::NotOpen),
        };

        if let Err(e) = validate(&session.draft) {
            session.error = Some(e.to_string());
            return Err(e.into());
        }

        let mut session = session.clone();
        session.error = None;
        let request = SubmitRequest {
            draft: session.draft.clone(),
        };
        self.state = ModalState::Submitting(session);
        Ok(request)
    }

    /// Settle a submit: close on success, reopen with the error on failure
    pub fn finish_submit(
        &mut self,
        result: Result<SavedRecord, ApiError>,
    ) -> Result<SavedRecord, CrudError> {
        let session = match std::mem::take(&mut self.state) {
            ModalState::Submitting(s) => s,
            other => {
                self.state = other;
                return Err(CrudError::NotSubmitting);
            }
        };

        match result {
            Ok(record) => {
                tracing::info!(
                    "Saved {} '{}' (id {})",
                    record.kind().display_name(),
                    record.label(),
                    record.id()
                );
                Ok(record)
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", session.draft.kind(), e);
                self.state = ModalState::Open(ModalSession {
                    draft: session.draft,
                    error: Some(e.summary()),
                });
                Err(e.into())
            }
        }
    }

    /// Validate, send and settle the open draft in one step
    ///
    /// On success the store refresh for `view` runs on a background task
    /// whose handle is returned.
    pub async fn submit(
        &mut self,
        api: &Arc<dyn AdminApi>,
        store: &ResourceStore,
        view: ConsoleView,
    ) -> Result<(SavedRecord, JoinHandle<RefreshReport>), CrudError> {
        let request = self.begin_submit()?;
        let result = request.execute(api.as_ref()).await;
        let record = self.finish_submit(result)?;
        let refresh = store.spawn_refresh(Arc::clone(api), view.dependencies());
        Ok((record, refresh))
    }
}
