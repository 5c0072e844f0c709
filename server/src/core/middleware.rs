//! Custom middlewares

use axum::{
	body::Body,
	extract::State,
	http::{HeaderMap, Request, header},
	middleware::Next,
	response::{IntoResponse, Response},
};

use crate::core::Auth;
use crate::prelude::*;

/// Attaches the session to the request if a valid one was presented.
///
/// Invalid or missing sessions leave the request anonymous, handlers that
/// need a session reject it through the `Auth` extractor.
pub async fn optional_auth(State(app): State<App>, mut req: Request<Body>, next: Next) -> Response {
	if let Some(token) = session_token(req.headers(), &app.opts.session_cookie) {
		match app.auth_adapter.validate_session(token).await {
			Ok(ctx) => {
				debug!(sub = %ctx.sub, "Session validated");
				req.extensions_mut().insert(Auth(ctx));
			}
			Err(err) => debug!("Ignoring invalid session: {}", err),
		}
	}

	next.run(req).await
}

/// Answers 408 when the rest of the stack does not finish in time
pub async fn request_timeout(State(app): State<App>, req: Request<Body>, next: Next) -> Response {
	let path = req.uri().path().to_owned();
	if let Ok(res) = tokio::time::timeout(app.opts.request_timeout, next.run(req)).await {
		res
	} else {
		warn!("Request to {} timed out after {:?}", path, app.opts.request_timeout);
		Error::Timeout.into_response()
	}
}

/// Session token from `Authorization: Bearer`, falling back to the session cookie
pub fn session_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
	let bearer = headers
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim)
		.filter(|token| !token.is_empty());
	if bearer.is_some() {
		return bearer;
	}

	headers
		.get_all(header::COOKIE)
		.iter()
		.filter_map(|h| h.to_str().ok())
		.flat_map(|h| h.split(';'))
		.filter_map(|cookie| cookie.trim().split_once('='))
		.find(|(name, _)| *name == cookie_name)
		.map(|(_, value)| value.trim())
		.filter(|token| !token.is_empty())
}


// vim: ts=4
