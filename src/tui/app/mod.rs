//! Application module
//!
//! This module contains the main TUI application state and logic, organized
//! into sub-modules by concern.

pub mod state;

mod async_ops;
mod core;
mod events;
mod rendering;

pub use core::*;
pub use state::{ConsoleEvent, Listings, PendingDelete, UIState};
