//! gate9s library
//!
//! Core of the gate9s console: the admin API client, the resource store and
//! its pollers, the listing engine and the create/edit/delete flows. The
//! terminal front end lives behind the `tui` feature.

pub mod api;
pub mod cli;
pub mod config;
pub mod crud;
pub mod listing;
pub mod models;
pub mod poller;
pub mod services;
pub mod store;
pub mod trace;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types for convenience
pub use api::{AdminApi, ApiError, HttpAdminClient};
pub use listing::ViewState;
pub use services::ConsoleSession;
pub use store::{Collection, ConsoleView, ResourceStore};
