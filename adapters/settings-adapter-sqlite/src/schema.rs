//! Database schema initialization

use sqlx::SqlitePool;

/// Creates the settings table and its index if they don't exist yet
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Settings
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS site_settings (
		key text NOT NULL CHECK (length(CAST(key AS BLOB)) BETWEEN 1 AND 255),
		value text,
		\"group\" text,
		updated_at integer NOT NULL DEFAULT (unixepoch()),
		PRIMARY KEY(key)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_site_settings_group ON site_settings(\"group\")")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
