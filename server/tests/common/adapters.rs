//! Test adapter builders and helpers
//!
//! Real adapters run against temporary storage. The mock adapters record what
//! the server asked of them or fail on purpose.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

use sitecfg::types::cache_adapter::{CacheInvalidator, InvalidationScope};
use sitecfg::types::prelude::*;
use sitecfg::types::settings_adapter::SettingsAdapter;
use sitecfg::types::types::{Setting, SettingEntry};
use sitecfg_settings_adapter_sqlite::SettingsAdapterSqlite;

pub async fn create_test_store() -> Arc<SettingsAdapterSqlite> {
	Arc::new(SettingsAdapterSqlite::in_memory().await.expect("Failed to create store"))
}

pub async fn create_test_store_on_disk() -> (Arc<SettingsAdapterSqlite>, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let store = SettingsAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create store");
	(Arc::new(store), temp_dir)
}

// TrackingStore //
//***************//
/// Delegates to another store and counts every call
#[derive(Debug)]
pub struct TrackingStore {
	inner: Arc<dyn SettingsAdapter>,
	calls: AtomicUsize,
}

impl TrackingStore {
	pub fn new(inner: Arc<dyn SettingsAdapter>) -> Arc<Self> {
		Arc::new(Self { inner, calls: AtomicUsize::new(0) })
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn track(&self) {
		self.calls.fetch_add(1, Ordering::SeqCst);
	}
}

#[async_trait]
impl SettingsAdapter for TrackingStore {
	async fn list_all(&self) -> ScResult<Vec<Setting>> {
		self.track();
		self.inner.list_all().await
	}

	async fn list_by_group(&self, group: &str) -> ScResult<Vec<Setting>> {
		self.track();
		self.inner.list_by_group(group).await
	}

	async fn read_setting(&self, key: &str) -> ScResult<Option<Setting>> {
		self.track();
		self.inner.read_setting(key).await
	}

	async fn upsert_batch(&self, entries: &[SettingEntry]) -> ScResult<Vec<Setting>> {
		self.track();
		self.inner.upsert_batch(entries).await
	}

	async fn insert_missing(&self, entries: &[SettingEntry]) -> ScResult<usize> {
		self.track();
		self.inner.insert_missing(entries).await
	}
}

// FailingStore //
//**************//
/// Store whose every operation fails like an unreachable database
#[derive(Debug, Default)]
pub struct FailingStore;

const STORE_DOWN: &str = "pool timed out while waiting for an open connection";

#[async_trait]
impl SettingsAdapter for FailingStore {
	async fn list_all(&self) -> ScResult<Vec<Setting>> {
		Err(Error::DbError(STORE_DOWN.into()))
	}

	async fn list_by_group(&self, _group: &str) -> ScResult<Vec<Setting>> {
		Err(Error::DbError(STORE_DOWN.into()))
	}

	async fn read_setting(&self, _key: &str) -> ScResult<Option<Setting>> {
		Err(Error::DbError(STORE_DOWN.into()))
	}

	async fn upsert_batch(&self, _entries: &[SettingEntry]) -> ScResult<Vec<Setting>> {
		Err(Error::DbError(STORE_DOWN.into()))
	}

	async fn insert_missing(&self, _entries: &[SettingEntry]) -> ScResult<usize> {
		Err(Error::DbError(STORE_DOWN.into()))
	}
}

// SlowStore //
//***********//
/// Delegates to another store after a fixed delay on every call
#[derive(Debug)]
pub struct SlowStore {
	inner: Arc<dyn SettingsAdapter>,
	delay: Duration,
}

impl SlowStore {
	pub fn new(inner: Arc<dyn SettingsAdapter>, delay: Duration) -> Arc<Self> {
		Arc::new(Self { inner, delay })
	}
}

#[async_trait]
impl SettingsAdapter for SlowStore {
	async fn list_all(&self) -> ScResult<Vec<Setting>> {
		tokio::time::sleep(self.delay).await;
		self.inner.list_all().await
	}

	async fn list_by_group(&self, group: &str) -> ScResult<Vec<Setting>> {
		tokio::time::sleep(self.delay).await;
		self.inner.list_by_group(group).await
	}

	async fn read_setting(&self, key: &str) -> ScResult<Option<Setting>> {
		tokio::time::sleep(self.delay).await;
		self.inner.read_setting(key).await
	}

	async fn upsert_batch(&self, entries: &[SettingEntry]) -> ScResult<Vec<Setting>> {
		tokio::time::sleep(self.delay).await;
		self.inner.upsert_batch(entries).await
	}

	// Seeding runs at build time and must not wait
	async fn insert_missing(&self, entries: &[SettingEntry]) -> ScResult<usize> {
		self.inner.insert_missing(entries).await
	}
}

// RecordingInvalidator //
//**********************//
/// Records every invalidation, optionally failing each one afterwards
#[derive(Debug, Default)]
pub struct RecordingInvalidator {
	scopes: Mutex<Vec<InvalidationScope>>,
	fail: bool,
}

impl RecordingInvalidator {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn failing() -> Arc<Self> {
		Arc::new(Self { scopes: Mutex::new(Vec::new()), fail: true })
	}

	pub fn scopes(&self) -> Vec<InvalidationScope> {
		self.scopes.lock().clone()
	}
}

#[async_trait]
impl CacheInvalidator for RecordingInvalidator {
	async fn invalidate(&self, scope: &InvalidationScope) -> ScResult<()> {
		self.scopes.lock().push(scope.clone());
		if self.fail {
			return Err(Error::Internal("revalidation endpoint unreachable".into()));
		}
		Ok(())
	}
}

// vim: ts=4
