//! SQLite implementation of the settings store.
//!
//! All settings live in a single `site_settings` table. Batched writes run in
//! one transaction so a failing entry rolls back the whole batch.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::{path::Path, time::Duration};

use sitecfg::{
	prelude::*,
	settings_adapter::SettingsAdapter,
	types::{Setting, SettingEntry},
};

mod schema;
mod setting;
mod utils;

/// File name of the database inside the data directory
pub const DB_FILE: &str = "settings.db";

#[derive(Debug)]
pub struct SettingsAdapterSqlite {
	db: SqlitePool,
}

impl SettingsAdapterSqlite {
	/// Opens (or creates) `settings.db` inside `dir`
	pub async fn new(dir: impl AsRef<Path>) -> ScResult<Self> {
		tokio::fs::create_dir_all(dir.as_ref()).await?;
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(dir.as_ref().join(DB_FILE))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(utils::inspect)
			.map_err(utils::db_err)?;

		Self::init(db).await
	}

	/// Opens a private in-memory database.
	///
	/// The pool is pinned to one connection that never expires, otherwise every
	/// new connection would see an empty database.
	pub async fn in_memory() -> ScResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new().in_memory(true);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(1)
			.idle_timeout(None::<Duration>)
			.max_lifetime(None::<Duration>)
			.connect_with(opts)
			.await
			.inspect_err(utils::inspect)
			.map_err(utils::db_err)?;

		Self::init(db).await
	}

	async fn init(db: SqlitePool) -> ScResult<Self> {
		schema::init_db(&db).await.inspect_err(utils::inspect).map_err(utils::db_err)?;
		info!("Settings database ready");
		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterSqlite {
	async fn list_all(&self) -> ScResult<Vec<Setting>> {
		setting::list(&self.db, None).await
	}

	async fn list_by_group(&self, group: &str) -> ScResult<Vec<Setting>> {
		setting::list(&self.db, Some(group)).await
	}

	async fn read_setting(&self, key: &str) -> ScResult<Option<Setting>> {
		setting::read(&self.db, key).await
	}

	async fn upsert_batch(&self, entries: &[SettingEntry]) -> ScResult<Vec<Setting>> {
		setting::upsert_batch(&self.db, entries).await
	}

	async fn insert_missing(&self, entries: &[SettingEntry]) -> ScResult<usize> {
		setting::insert_missing(&self.db, entries).await
	}
}

// vim: ts=4
