//! Gateway console model layer
//!
//! Plain records mirroring the gateway admin API payloads.
//!
//! Structure:
//! - `resource_kind.rs` - The CRUD-manageable resource kinds
//! - `resources.rs` - Service, Route and ProtoMapping records
//! - `logs.rs` - Activity, traffic, trace and server console entries
//! - `metrics.rs` - Per-service metrics snapshot
//! - `draft.rs` - Mutation payloads ("record minus id")

pub mod draft;
pub mod logs;
pub mod metrics;
pub mod resource_kind;
pub mod resources;

pub use draft::{ProtoMappingDraft, ResourceDraft, RouteDraft, ServiceDraft};
pub use logs::{
    ActivityAction, ActivityLogEntry, RequestLogEntry, ServerLogEntry, TraceEntry, TraceLevel,
};
pub use metrics::{MetricsSnapshot, PathMetrics, ServiceMetrics};
pub use resource_kind::ResourceKind;
pub use resources::{ProtoMapping, Protocol, ResourceId, Route, SavedRecord, Service};

use serde::{Deserialize, Deserializer};

/// Deserialize a field that the backend may send as `null` into its default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
