//! Adapter that validates sessions issued by the identity provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// Authenticated session context
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCtx {
	/// Subject (user identifier) of the session
	pub sub: Box<str>,
	pub name: Option<Box<str>>,
	pub email: Option<Box<str>>,
	/// Expiry of the session
	pub exp: Timestamp,
}

#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	/// Validates a session token and returns its context.
	///
	/// Any invalid, expired or malformed token is [`Error::Unauthorized`].
	async fn validate_session(&self, token: &str) -> ScResult<AuthCtx>;
}

// vim: ts=4
