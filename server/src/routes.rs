use axum::{
	Router, middleware,
	routing::get,
};
use tower_http::trace::TraceLayer;

use crate::core::middleware::{optional_auth, request_timeout};
use crate::prelude::*;
use crate::settings;

async fn get_health() -> &'static str {
	"ok"
}

pub fn init(app: App) -> Router {
	let settings_router = Router::new()
		.route(
			"/settings",
			get(settings::handler::get_settings).post(settings::handler::post_settings),
		)
		.route_layer(middleware::from_fn_with_state(app.clone(), optional_auth));

	Router::new()
		.merge(settings_router)
		.route("/health", get(get_health))
		.layer(middleware::from_fn_with_state(app.clone(), request_timeout))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
