//! App state type

use std::{
	path::{Path, PathBuf},
	sync::Arc,
	time::Duration,
};

use sitecfg_types::auth_adapter::AuthAdapter;
use sitecfg_types::cache_adapter::CacheInvalidator;
use sitecfg_types::settings_adapter::SettingsAdapter;

use crate::bootstrap;
use crate::cache::CacheInvalidators;
use crate::prelude::*;
use crate::routes;
use crate::settings::{SettingDefinition, SettingsRegistry, SettingsService};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub settings: SettingsService,
	pub opts: AppBuilderOpts,

	pub auth_adapter: Arc<dyn AuthAdapter>,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub settings_adapter: Option<Arc<dyn SettingsAdapter>>,
	pub auth_adapter: Option<Arc<dyn AuthAdapter>>,
	pub cache_invalidators: CacheInvalidators,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Name of the cookie carrying the session token
	pub session_cookie: Box<str>,
	pub request_timeout: Duration,
	/// JSON file of settings inserted at startup when missing
	pub seed_file: Option<Box<Path>>,
	/// JSON object of additional defaults
	pub defaults_file: Option<Box<Path>>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
	definitions: Vec<SettingDefinition>,
	seed: Vec<SettingEntry>,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:3000".into(),
				session_cookie: "session-token".into(),
				request_timeout: Duration::from_secs(60),
				seed_file: None,
				defaults_file: None,
			},
			adapters: Adapters {
				settings_adapter: None,
				auth_adapter: None,
				cache_invalidators: CacheInvalidators::new(),
			},
			definitions: Vec::new(),
			seed: Vec::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn session_cookie(&mut self, session_cookie: impl Into<Box<str>>) -> &mut Self {
		self.opts.session_cookie = session_cookie.into();
		self
	}
	pub fn request_timeout(&mut self, request_timeout: Duration) -> &mut Self {
		self.opts.request_timeout = request_timeout;
		self
	}
	pub fn seed_file(&mut self, seed_file: impl Into<PathBuf>) -> &mut Self {
		self.opts.seed_file = Some(seed_file.into().into_boxed_path());
		self
	}
	pub fn defaults_file(&mut self, defaults_file: impl Into<PathBuf>) -> &mut Self {
		self.opts.defaults_file = Some(defaults_file.into().into_boxed_path());
		self
	}

	// Settings
	pub fn setting(&mut self, definition: SettingDefinition) -> &mut Self {
		self.definitions.push(definition);
		self
	}
	pub fn seed(&mut self, entries: impl IntoIterator<Item = SettingEntry>) -> &mut Self {
		self.seed.extend(entries);
		self
	}

	// Adapters
	pub fn settings_adapter(&mut self, settings_adapter: Arc<dyn SettingsAdapter>) -> &mut Self {
		self.adapters.settings_adapter = Some(settings_adapter);
		self
	}
	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self {
		self.adapters.auth_adapter = Some(auth_adapter);
		self
	}
	pub fn cache_invalidator(&mut self, invalidator: Arc<dyn CacheInvalidator>) -> &mut Self {
		self.adapters.cache_invalidators.push(invalidator);
		self
	}

	/// Assembles the application state: registers settings, seeds the store.
	pub async fn build(self) -> ScResult<App> {
		let settings_adapter = self
			.adapters
			.settings_adapter
			.ok_or_else(|| Error::ConfigError("No settings adapter".into()))?;
		let auth_adapter =
			self.adapters.auth_adapter.ok_or_else(|| Error::ConfigError("No auth adapter".into()))?;

		let mut registry = SettingsRegistry::new();
		crate::core::settings::register_settings(&mut registry)?;
		for definition in self.definitions {
			registry.register(definition)?;
		}
		if let Some(defaults_file) = &self.opts.defaults_file {
			for definition in bootstrap::load_defaults(defaults_file).await? {
				registry.register(definition)?;
			}
		}

		let mut seed = self.seed;
		if let Some(seed_file) = &self.opts.seed_file {
			seed.extend(bootstrap::load_seed(seed_file).await?);
		}
		bootstrap::seed_settings(settings_adapter.as_ref(), &seed).await?;

		if self.adapters.cache_invalidators.is_empty() {
			info!("No cache invalidators configured");
		}
		let settings = SettingsService::new(
			Arc::new(registry.freeze()),
			settings_adapter,
			Arc::new(self.adapters.cache_invalidators),
		);

		Ok(Arc::new(AppState { settings, opts: self.opts, auth_adapter }))
	}

	pub async fn run(self) -> ScResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("sitecfg V{}", VERSION);

		// Fails only if a provider is already installed
		let _ = rustls::crypto::CryptoProvider::install_default(
			rustls::crypto::aws_lc_rs::default_provider(),
		);

		let app = self.build().await?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on HTTP {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
