//! Reusable test fixtures: sessions and application setup

use axum::Router;
use std::sync::Arc;
use std::time::Duration;

use sitecfg::auth::{JwtAuthAdapter, SessionClaims, issue_session_token};
use sitecfg::types::auth_adapter::AuthCtx;
use sitecfg::types::cache_adapter::CacheInvalidator;
use sitecfg::types::settings_adapter::SettingsAdapter;
use sitecfg::types::types::{Timestamp, now};
use sitecfg::{App, AppBuilder, routes};

pub const TEST_SECRET: &[u8] = b"sitecfg test secret";

pub fn auth_ctx() -> AuthCtx {
	AuthCtx {
		sub: "admin".into(),
		name: Some("Site Admin".into()),
		email: Some("admin@example.com".into()),
		exp: Timestamp(now().0 + 3600),
	}
}

/// Session token as issued by the identity provider
pub fn session_token(sub: &str) -> String {
	let claims = SessionClaims { sub: Some(sub.into()), exp: now().0 + 3600, name: None, email: None };
	issue_session_token(TEST_SECRET, &claims).expect("Failed to issue token")
}

fn test_app_builder(store: Arc<dyn SettingsAdapter>, invalidator: Arc<dyn CacheInvalidator>) -> AppBuilder {
	let mut builder = AppBuilder::new();
	builder
		.settings_adapter(store)
		.auth_adapter(Arc::new(JwtAuthAdapter::new(TEST_SECRET).expect("Invalid secret")))
		.cache_invalidator(invalidator);
	builder
}

pub async fn create_test_app(
	store: Arc<dyn SettingsAdapter>,
	invalidator: Arc<dyn CacheInvalidator>,
) -> App {
	test_app_builder(store, invalidator).build().await.expect("Failed to build app")
}

pub async fn create_test_router(
	store: Arc<dyn SettingsAdapter>,
	invalidator: Arc<dyn CacheInvalidator>,
) -> Router {
	routes::init(create_test_app(store, invalidator).await)
}

/// Router whose requests are abandoned after `timeout`
pub async fn create_test_router_with_timeout(
	store: Arc<dyn SettingsAdapter>,
	invalidator: Arc<dyn CacheInvalidator>,
	timeout: Duration,
) -> Router {
	let mut builder = test_app_builder(store, invalidator);
	builder.request_timeout(timeout);
	routes::init(builder.build().await.expect("Failed to build app"))
}

// vim: ts=4
