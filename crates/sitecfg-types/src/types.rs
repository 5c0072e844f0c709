//! Common types used throughout sitecfg.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

// Timestamp //
//***********//
/// Unix timestamp in seconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

pub fn now() -> Timestamp {
	let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
	Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
}

// Setting //
//*********//
/// A single persisted key/value/group record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
	pub key: String,
	pub value: Option<String>,
	pub group: Option<String>,
	pub updated_at: Timestamp,
}

impl Setting {
	/// Value as seen by readers: a missing value reads as an empty string
	pub fn value_or_empty(&self) -> &str {
		self.value.as_deref().unwrap_or_default()
	}
}

/// Write input for the settings store.
///
/// `value` is already coerced to its string form. A `None` group leaves the
/// stored group untouched on update and stores NULL on insert.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SettingEntry {
	pub key: String,
	pub value: String,
	#[serde(default)]
	pub group: Option<String>,
}

impl SettingEntry {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self { key: key.into(), value: value.into(), group: None }
	}

	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}
}


// vim: ts=4
