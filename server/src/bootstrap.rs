//! Startup provisioning: operator-supplied defaults and seed settings

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::path::Path;

use sitecfg_types::settings_adapter::SettingsAdapter;

use crate::prelude::*;
use crate::settings::{SettingDefinition, coerce_value};

/// One element of a seed file
#[derive(Debug, Deserialize)]
struct SeedEntry {
	key: String,
	#[serde(default)]
	value: Value,
	#[serde(default)]
	group: Option<String>,
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> ScResult<T> {
	let data = tokio::fs::read(path).await.map_err(|err| {
		Error::ConfigError(format!("Cannot read {}: {}", path.display(), err))
	})?;
	serde_json::from_slice(&data)
		.map_err(|err| Error::ConfigError(format!("Invalid JSON in {}: {}", path.display(), err)))
}

/// Reads a seed file: `[{"key": ..., "value": ..., "group": ...}, ...]`
pub async fn load_seed(path: &Path) -> ScResult<Vec<SettingEntry>> {
	let entries: Vec<SeedEntry> = read_json(path).await?;

	Ok(entries
		.into_iter()
		.map(|entry| SettingEntry {
			key: entry.key,
			value: coerce_value(&entry.value),
			group: entry.group,
		})
		.collect())
}

/// Reads a defaults file: a JSON object of key to default value
pub async fn load_defaults(path: &Path) -> ScResult<Vec<SettingDefinition>> {
	let defaults: Map<String, Value> = read_json(path).await?;

	defaults
		.into_iter()
		.map(|(key, value)| {
			SettingDefinition::builder(key)
				.description(format!("Default from {}", path.display()))
				.default(coerce_value(&value))
				.build()
		})
		.collect()
}

/// Stores seed entries whose key is not stored yet
pub async fn seed_settings(store: &dyn SettingsAdapter, entries: &[SettingEntry]) -> ScResult<usize> {
	if entries.is_empty() {
		return Ok(0);
	}

	let inserted = store.insert_missing(entries).await?;
	info!("Seeded {} of {} settings", inserted, entries.len());
	Ok(inserted)
}


// vim: ts=4
