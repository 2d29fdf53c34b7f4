//! Request trace timelines
//!
//! Fetches the diagnostic events the gateway recorded while serving one
//! request and keeps them for display. Read-only; nothing here mutates the
//! gateway.

mod timeline;
mod viewer;

pub use timeline::{fetch_timeline, format_offset, format_timeline};
pub use viewer::TraceViewer;
