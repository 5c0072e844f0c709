//! Adapter that stores site settings.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::{Setting, SettingEntry};

/// Durable key/value store of settings.
///
/// Keys are unique. Writing an existing key replaces its value in place.
/// Storage failures are reported as [`Error::DbError`].
#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// Every persisted setting, in no particular order
	async fn list_all(&self) -> ScResult<Vec<Setting>>;

	/// Settings whose group equals `group`. No match is an empty list, not an error.
	async fn list_by_group(&self, group: &str) -> ScResult<Vec<Setting>>;

	/// Point lookup by key
	async fn read_setting(&self, key: &str) -> ScResult<Option<Setting>>;

	/// Creates or overwrites every entry inside a single transaction.
	///
	/// Either all entries are applied or none is. The stored records are
	/// returned in the same order as `entries`.
	async fn upsert_batch(&self, entries: &[SettingEntry]) -> ScResult<Vec<Setting>>;

	/// Inserts the entries whose key does not exist yet, in one transaction.
	///
	/// Returns the number of inserted records.
	async fn insert_missing(&self, entries: &[SettingEntry]) -> ScResult<usize>;
}

// vim: ts=4
