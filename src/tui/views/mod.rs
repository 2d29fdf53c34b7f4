//! TUI view components
//!
//! Each component renders one part of the interface from borrowed state;
//! none of them mutate the app.

mod confirmation;
mod footer;
mod form;
mod header;
pub mod helpers;
mod overview;
pub mod tables;
mod trace;

pub use confirmation::*;
pub use footer::*;
pub use form::*;
pub use header::*;
pub use overview::*;
pub use tables::{
    render_activity, render_proto_mappings, render_routes, render_server_log, render_services,
    render_traffic,
};
pub use trace::*;
