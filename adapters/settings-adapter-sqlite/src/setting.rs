//! Settings key-value store management

use sqlx::SqlitePool;

use sitecfg::prelude::*;
use sitecfg::types::{Setting, SettingEntry};

use crate::utils::{db_err, inspect, map_setting};

const UPSERT: &str = "INSERT INTO site_settings (key, value, \"group\", updated_at)
	VALUES (?1, ?2, ?3, unixepoch())
	ON CONFLICT(key) DO UPDATE SET
		value = excluded.value,
		\"group\" = coalesce(excluded.\"group\", site_settings.\"group\"),
		updated_at = excluded.updated_at
	RETURNING key, value, \"group\", updated_at";

/// List all settings or the ones in a single group
pub(crate) async fn list(db: &SqlitePool, group: Option<&str>) -> ScResult<Vec<Setting>> {
	let res = if let Some(group) = group {
		sqlx::query("SELECT key, value, \"group\", updated_at FROM site_settings WHERE \"group\" = ?")
			.bind(group)
			.fetch_all(db)
			.await
	} else {
		sqlx::query("SELECT key, value, \"group\", updated_at FROM site_settings").fetch_all(db).await
	};
	let rows = res.inspect_err(inspect).map_err(db_err)?;

	rows.iter().map(map_setting).collect::<Result<Vec<_>, _>>().inspect_err(inspect).map_err(db_err)
}

/// Read a single setting by key
pub(crate) async fn read(db: &SqlitePool, key: &str) -> ScResult<Option<Setting>> {
	let row = sqlx::query("SELECT key, value, \"group\", updated_at FROM site_settings WHERE key = ?")
		.bind(key)
		.fetch_optional(db)
		.await
		.inspect_err(inspect)
		.map_err(db_err)?;

	row.as_ref().map(map_setting).transpose().inspect_err(inspect).map_err(db_err)
}

/// Create or update every entry in one transaction
pub(crate) async fn upsert_batch(db: &SqlitePool, entries: &[SettingEntry]) -> ScResult<Vec<Setting>> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(db_err)?;
	let mut results = Vec::with_capacity(entries.len());

	for entry in entries {
		// Dropping `tx` on the error path rolls the batch back
		let row = sqlx::query(UPSERT)
			.bind(&entry.key)
			.bind(&entry.value)
			.bind(entry.group.as_deref())
			.fetch_one(&mut *tx)
			.await
			.inspect_err(inspect)
			.map_err(db_err)?;
		results.push(map_setting(&row).inspect_err(inspect).map_err(db_err)?);
	}

	tx.commit().await.inspect_err(inspect).map_err(db_err)?;
	debug!(count = results.len(), "Settings batch committed");

	Ok(results)
}

/// Insert entries whose key is not stored yet, leaving existing ones untouched
pub(crate) async fn insert_missing(db: &SqlitePool, entries: &[SettingEntry]) -> ScResult<usize> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(db_err)?;
	let mut inserted = 0;

	for entry in entries {
		let res = sqlx::query(
			"INSERT INTO site_settings (key, value, \"group\") VALUES (?1, ?2, ?3)
			ON CONFLICT(key) DO NOTHING",
		)
		.bind(&entry.key)
		.bind(&entry.value)
		.bind(entry.group.as_deref())
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(db_err)?;
		if res.rows_affected() > 0 {
			inserted += 1;
		}
	}

	tx.commit().await.inspect_err(inspect).map_err(db_err)?;
	Ok(inserted)
}

// vim: ts=4
