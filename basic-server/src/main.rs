use std::{env, path, sync::Arc, time::Duration};

use sitecfg::auth::JwtAuthAdapter;
use sitecfg::cache::RevalidateWebhook;
use sitecfg::types::prelude::*;
use sitecfg_settings_adapter_sqlite::SettingsAdapterSqlite;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub session_secret: String,
	pub session_cookie: Option<String>,
	pub request_timeout: Option<u64>,
	pub revalidate_url: Option<String>,
	pub revalidate_secret: Option<String>,
	pub seed_file: Option<path::PathBuf>,
	pub defaults_file: Option<path::PathBuf>,
}

impl Config {
	fn from_env() -> ScResult<Self> {
		let request_timeout = env::var("REQUEST_TIMEOUT")
			.ok()
			.map(|secs| {
				secs.parse::<u64>()
					.map_err(|_| Error::ConfigError(format!("Invalid REQUEST_TIMEOUT: {}", secs)))
			})
			.transpose()?;

		Ok(Config {
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
			session_secret: env::var("SESSION_SECRET")
				.map_err(|_| Error::ConfigError("SESSION_SECRET is not set".into()))?,
			session_cookie: env::var("SESSION_COOKIE").ok(),
			request_timeout,
			revalidate_url: env::var("REVALIDATE_URL").ok(),
			revalidate_secret: env::var("REVALIDATE_SECRET").ok(),
			seed_file: env::var("SEED_FILE").ok().map(path::PathBuf::from),
			defaults_file: env::var("DEFAULTS_FILE").ok().map(path::PathBuf::from),
		})
	}
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ScResult<()> {
	let config = Config::from_env()?;

	let settings_adapter = Arc::new(SettingsAdapterSqlite::new(&config.db_dir).await?);
	let auth_adapter = Arc::new(JwtAuthAdapter::new(config.session_secret.as_bytes())?);

	let mut builder = sitecfg::AppBuilder::new();
	builder
		.listen(config.listen)
		.settings_adapter(settings_adapter)
		.auth_adapter(auth_adapter);

	if let Some(session_cookie) = config.session_cookie {
		builder.session_cookie(session_cookie);
	}
	if let Some(secs) = config.request_timeout {
		builder.request_timeout(Duration::from_secs(secs));
	}
	if let Some(url) = &config.revalidate_url {
		let webhook = RevalidateWebhook::new(url, config.revalidate_secret.as_deref())?;
		builder.cache_invalidator(Arc::new(webhook));
	}
	if let Some(seed_file) = config.seed_file {
		builder.seed_file(seed_file);
	}
	if let Some(defaults_file) = config.defaults_file {
		builder.defaults_file(defaults_file);
	}

	builder.run().await
}

// vim: ts=4
