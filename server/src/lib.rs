//! sitecfg is a small site settings service.
//!
//! # Features
//!
//! - Public reads of all settings, or of one group, as a flat JSON object
//! - Authenticated batch writes applied in a single transaction
//! - System defaults and forced values merged into every read
//! - Downstream cache invalidation after every successful write
//!
//! Storage, session validation and cache invalidation are adapters behind the
//! traits of the `sitecfg-types` crate, so the same server runs against the
//! bundled SQLite store or anything else implementing them.

#![forbid(unsafe_code)]

pub mod auth;
pub mod bootstrap;
pub mod cache;
pub mod core;
pub mod prelude;
pub mod routes;
pub mod settings;

pub use crate::core::app::{App, AppBuilder, AppState};
pub use sitecfg_types as types;

// vim: ts=4
