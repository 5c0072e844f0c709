//! Settings subsystem
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): definitions, registry and value coercion
//! - **Service** (`service.rs`): read path (defaults merge) and write path
//!   (transactional save plus cache invalidation)
//! - **Handler** (`handler.rs`): HTTP API endpoints

pub mod handler;
pub mod service;
pub mod types;

pub use service::SettingsService;
pub use types::{
	FrozenSettingsRegistry, SettingDefinition, SettingDefinitionBuilder, SettingsRegistry,
	coerce_value,
};

// vim: ts=4
