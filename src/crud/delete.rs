//! Confirm-then-delete flow
//!
//! Deletion never happens without an explicit yes from a `Confirmer`. The
//! confirmer is awaited, so any front end (terminal prompt, test double,
//! scripted answer) can supply the decision.

use crate::api::{self, AdminApi, ApiError};
use crate::models::{ProtoMapping, ResourceId, ResourceKind, Route, Service};
use crate::store::{ConsoleView, ResourceStore};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tokio::sync::oneshot;

/// The record a delete was requested for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub kind: ResourceKind,
    pub id: ResourceId,
    pub label: String,
}

impl DeleteTarget {
    pub fn prompt(&self) -> String {
        format!(
            "Delete {} '{}' (id {})?",
            self.kind.display_name(),
            self.label,
            self.id
        )
    }
}

impl From<&Service> for DeleteTarget {
    fn from(service: &Service) -> Self {
        Self {
            kind: ResourceKind::Service,
            id: service.id,
            label: service.name.clone(),
        }
    }
}

impl From<&Route> for DeleteTarget {
    fn from(route: &Route) -> Self {
        Self {
            kind: ResourceKind::Route,
            id: route.id,
            label: format!("{} {}", route.method, route.path),
        }
    }
}

impl From<&ProtoMapping> for DeleteTarget {
    fn from(mapping: &ProtoMapping) -> Self {
        Self {
            kind: ResourceKind::ProtoMapping,
            id: mapping.id,
            label: mapping.rpc_method.clone(),
        }
    }
}

/// Source of a yes/no answer for a destructive action
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Confirmer answered through a oneshot channel
///
/// A dropped sender counts as "no". The confirmer answers once; later
/// prompts are declined.
pub struct ChannelConfirmer {
    answer: Mutex<Option<oneshot::Receiver<bool>>>,
}

impl ChannelConfirmer {
    pub fn channel() -> (oneshot::Sender<bool>, Self) {
        let (tx, rx) = oneshot::channel();
        (
            tx,
            Self {
                answer: Mutex::new(Some(rx)),
            },
        )
    }
}

#[async_trait]
impl Confirmer for ChannelConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        let rx = self
            .answer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match rx {
            Some(rx) => rx.await.unwrap_or(false),
            None => {
                tracing::debug!("Confirmer already used, declining: {}", prompt);
                false
            }
        }
    }
}

/// Result of a delete flow
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
    Failed(ApiError),
}

/// Ask for confirmation, then delete `target` and refresh `view`
///
/// Declining issues no request. A failed delete is not followed by a refresh.
pub async fn delete_with_confirmation(
    api: &dyn AdminApi,
    store: &ResourceStore,
    view: ConsoleView,
    target: &DeleteTarget,
    confirmer: &dyn Confirmer,
) -> DeleteOutcome {
    if !confirmer.confirm(&target.prompt()).await {
        tracing::debug!("Delete of {} {} declined", target.kind, target.id);
        return DeleteOutcome::Declined;
    }

    match api::delete_resource(api, target.kind, target.id).await {
        Ok(()) => {
            tracing::info!(
                "Deleted {} '{}' (id {})",
                target.kind.display_name(),
                target.label,
                target.id
            );
            store.refresh(api, view).await;
            DeleteOutcome::Deleted
        }
        Err(e) => {
            tracing::warn!("Failed to delete {} {}: {}", target.kind, target.id, e);
            DeleteOutcome::Failed(e)
        }
    }
}
