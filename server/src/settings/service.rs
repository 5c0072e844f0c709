//! Settings service: the read and write paths behind the HTTP handlers
//!
//! The service holds no settings state of its own. Every read queries the
//! store, every write is one store transaction followed by a cache
//! invalidation. Concurrent writes to the same key resolve last-write-wins.

use serde_json::{Map, Value};
use std::sync::Arc;

use sitecfg_types::auth_adapter::AuthCtx;
use sitecfg_types::cache_adapter::{CacheInvalidator, InvalidationScope};
use sitecfg_types::settings_adapter::SettingsAdapter;

use crate::prelude::*;

use super::types::{FrozenSettingsRegistry, coerce_value};

/// Settings service - main interface for reading and saving settings
#[derive(Debug)]
pub struct SettingsService {
	registry: Arc<FrozenSettingsRegistry>,
	store: Arc<dyn SettingsAdapter>,
	invalidator: Arc<dyn CacheInvalidator>,
}

impl SettingsService {
	pub fn new(
		registry: Arc<FrozenSettingsRegistry>,
		store: Arc<dyn SettingsAdapter>,
		invalidator: Arc<dyn CacheInvalidator>,
	) -> Self {
		Self { registry, store, invalidator }
	}

	pub fn registry(&self) -> &FrozenSettingsRegistry {
		&self.registry
	}

	/// Returns all settings, or those of one group, as a flat key/value map.
	///
	/// Registered defaults fill in keys the store does not have, stored values
	/// win over defaults, and forced settings override both. An empty store
	/// is not an error.
	pub async fn get_settings(&self, group: Option<&str>) -> ScResult<Map<String, Value>> {
		let res = match group {
			Some(group) => self.store.list_by_group(group).await,
			None => self.store.list_all().await,
		};
		let stored = res.map_err(|err| {
			warn!("Failed to get settings: {}", err);
			Error::ReadFailure(err.details())
		})?;
		debug!(group = ?group, count = stored.len(), "Settings loaded");

		let mut settings = Map::new();
		for def in self.registry.defaults(group) {
			settings.insert(def.key.clone(), def.default.clone());
		}
		for setting in stored {
			let value = Value::String(setting.value_or_empty().to_owned());
			settings.insert(setting.key, value);
		}
		for def in self.registry.forced() {
			settings.insert(def.key.clone(), def.default.clone());
		}

		Ok(settings)
	}

	/// Stores every key of `payload` in one transaction.
	///
	/// Requires a session. Values are coerced to strings with
	/// [`coerce_value`]. After a successful commit the whole site is
	/// invalidated; an invalidation failure is logged and does not affect the
	/// result.
	pub async fn save_settings(
		&self,
		auth: Option<&AuthCtx>,
		payload: &Map<String, Value>,
	) -> ScResult<Vec<Setting>> {
		let Some(auth) = auth else {
			return Err(Error::Unauthorized);
		};

		if payload.is_empty() {
			debug!(sub = %auth.sub, "Empty settings payload, nothing to save");
			return Ok(Vec::new());
		}

		let entries: Vec<SettingEntry> = payload
			.iter()
			.map(|(key, value)| SettingEntry::new(key.clone(), coerce_value(value)))
			.collect();

		let results = self.store.upsert_batch(&entries).await.map_err(|err| {
			warn!("Database operation failed: {}", err);
			Error::WriteFailure(err.details())
		})?;
		info!(sub = %auth.sub, count = results.len(), "Settings saved");

		let scope = InvalidationScope::global();
		if let Err(err) = self.invalidator.invalidate(&scope).await {
			warn!("Cache invalidation of {:?} failed: {}", scope, err);
		}

		Ok(results)
	}
}

// vim: ts=4
