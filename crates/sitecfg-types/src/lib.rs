//! Shared types, adapter traits, and core utilities for sitecfg.
//!
//! This crate holds everything the server crate and the adapter crates agree on:
//! the `Setting` record, the error type, and the traits behind which storage,
//! session validation and cache invalidation are plugged in. Keeping them here
//! lets adapter crates compile without depending on the server.

pub mod auth_adapter;
pub mod cache_adapter;
pub mod error;
pub mod extract;
pub mod prelude;
pub mod settings_adapter;
pub mod types;

// vim: ts=4
