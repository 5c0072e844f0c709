//! Axum extractor for the authenticated session.
//!
//! The session middleware stores an [`Auth`] in the request extensions when a
//! valid session was presented. The extractor reads it back.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth_adapter::AuthCtx;
use crate::error::Error;

// Auth //
//******//
/// Requires a session, rejects with [`Error::Unauthorized`] otherwise
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts.extensions.get::<Auth>().cloned().ok_or(Error::Unauthorized)
	}
}

// vim: ts=4
