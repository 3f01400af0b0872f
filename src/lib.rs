//! uniadmin: terminal admin console for a university records REST API
//!
//! The crate is organized around one generic list-view controller
//! ([`listview::ListView`]) parameterized over the six record types in
//! [`models`], fed by a REST [`api::RecordSource`], and presented either
//! through the CLI or the interactive [`tui`].

pub mod api;
pub mod cli;
pub mod config;
pub mod listview;
pub mod models;
pub mod tui;
