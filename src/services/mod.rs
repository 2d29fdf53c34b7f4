//! Service layer for console logic
//!
//! Bundles the admin client, the resource store and the refresh timers so
//! front ends (the TUI, the `snapshot` command, tests) drive one object
//! instead of wiring the pieces together themselves.

pub mod console_session;

pub use console_session::ConsoleSession;
