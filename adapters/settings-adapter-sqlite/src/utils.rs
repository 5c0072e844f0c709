//! Error mapping helpers

use sitecfg::prelude::*;
use sqlx::{Row, sqlite::SqliteRow};

use sitecfg::types::Setting;

pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Storage errors keep their message so callers can report it
pub(crate) fn db_err(err: sqlx::Error) -> Error {
	Error::DbError(err.to_string())
}

pub(crate) fn map_setting(row: &SqliteRow) -> Result<Setting, sqlx::Error> {
	Ok(Setting {
		key: row.try_get("key")?,
		value: row.try_get("value")?,
		group: row.try_get("group")?,
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

// vim: ts=4
