//! Core infrastructure: application state, builder and session middleware.

pub mod app;
pub mod middleware;
pub mod settings;

pub use sitecfg_types::extract::Auth;

// vim: ts=4
