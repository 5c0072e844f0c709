//! Settings types and definitions
//!
//! Definitions describe keys the server knows about before anything is
//! stored: their default value, the group the default belongs to, and whether
//! the value is forced over whatever the store holds.

use serde_json::Value;
use std::collections::HashMap;

use crate::prelude::*;

/// Setting definition - metadata and default for a known key
#[derive(Debug, Clone, PartialEq)]
pub struct SettingDefinition {
	pub key: String,

	/// Human-readable description
	pub description: String,

	/// Value reported while the store has none
	pub default: Value,

	/// Group the default is reported under. `None` applies to every read.
	pub group: Option<String>,

	/// Forced settings override stored values in every read
	pub forced: bool,
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<String>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}

	/// Whether this definition takes part in a read filtered by `group`
	pub fn applies_to(&self, group: Option<&str>) -> bool {
		if self.forced {
			return true;
		}
		match (group, self.group.as_deref()) {
			(None, _) | (_, None) => true,
			(Some(filter), Some(own)) => filter == own,
		}
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	description: Option<String>,
	default: Option<Value>,
	group: Option<String>,
	forced: bool,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into(), description: None, default: None, group: None, forced: false }
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the default value (required)
	///
	/// Unless the setting is forced, the value is reported in its stored
	/// string form, e.g. `10` as `"10"`.
	pub fn default(mut self, value: impl Into<Value>) -> Self {
		self.default = Some(value.into());
		self
	}

	pub fn group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}

	/// Force the default over any stored value
	pub fn forced(mut self, forced: bool) -> Self {
		self.forced = forced;
		self
	}

	/// Build the SettingDefinition
	pub fn build(self) -> ScResult<SettingDefinition> {
		if self.key.is_empty() || self.key.len() > 255 {
			return Err(Error::ConfigError(format!("Invalid setting key: '{}'", self.key)));
		}
		let description = self
			.description
			.ok_or_else(|| Error::ConfigError("Setting description is required".into()))?;
		let default = self.default.ok_or_else(|| {
			Error::ConfigError(format!("Setting '{}' has no default value", self.key))
		})?;
		// Reads report stored values as strings, defaults follow suit
		let default =
			if self.forced { default } else { Value::String(coerce_value(&default)) };

		Ok(SettingDefinition {
			key: self.key,
			description,
			default,
			group: self.group,
			forced: self.forced,
		})
	}
}

/// Mutable registry used during app initialization
#[derive(Debug, Default)]
pub struct SettingsRegistry {
	definitions: HashMap<String, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: HashMap::new() }
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> ScResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		debug!("Registering setting: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		info!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

/// Immutable registry stored in the settings service
#[derive(Debug, Default)]
pub struct FrozenSettingsRegistry {
	definitions: HashMap<String, SettingDefinition>,
}

impl FrozenSettingsRegistry {
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.definitions.get(key)
	}

	/// List all registered settings
	pub fn list(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.values()
	}

	/// Defaults reported by a read filtered by `group`, forced ones excluded
	pub fn defaults<'a>(
		&'a self,
		group: Option<&'a str>,
	) -> impl Iterator<Item = &'a SettingDefinition> + 'a {
		self.definitions.values().filter(move |def| !def.forced && def.applies_to(group))
	}

	/// Settings whose value overrides storage
	pub fn forced(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.values().filter(|def| def.forced)
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

/// Converts a submitted JSON value into the string that gets stored.
///
/// Strings are kept as-is, `null` becomes the empty string, and every other
/// value is stored as its compact JSON text (`true`, `42`, `[1,2]`).
pub fn coerce_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		Value::Array(_) | Value::Object(_) => value.to_string(),
	}
}


// vim: ts=4
