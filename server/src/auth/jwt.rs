//! HS256 session tokens shared with the identity provider.
//!
//! The identity provider signs session tokens with a secret it shares with
//! this server. A token is accepted when its signature checks out, it has not
//! expired and it names a subject.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use sitecfg_types::auth_adapter::{AuthAdapter, AuthCtx};

use crate::prelude::*;

/// Claims of a session token
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionClaims {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sub: Option<Box<str>>,
	pub exp: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<Box<str>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<Box<str>>,
}

/// Signs `claims` with `secret`, the way the identity provider does
pub fn issue_session_token(secret: &[u8], claims: &SessionClaims) -> ScResult<String> {
	jsonwebtoken::encode(
		&Header::new(Algorithm::HS256),
		claims,
		&EncodingKey::from_secret(secret),
	)
	.map_err(|err| Error::Internal(format!("Failed to sign session token: {}", err)))
}

pub struct JwtAuthAdapter {
	decoding_key: DecodingKey,
	validation: Validation,
}

impl std::fmt::Debug for JwtAuthAdapter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JwtAuthAdapter").field("algorithm", &Algorithm::HS256).finish_non_exhaustive()
	}
}

impl JwtAuthAdapter {
	pub fn new(secret: &[u8]) -> ScResult<Self> {
		if secret.is_empty() {
			return Err(Error::ConfigError("Session secret must not be empty".into()));
		}

		let mut validation = Validation::new(Algorithm::HS256);
		validation.set_required_spec_claims(&["exp"]);

		Ok(Self { decoding_key: DecodingKey::from_secret(secret), validation })
	}
}

#[async_trait]
impl AuthAdapter for JwtAuthAdapter {
	async fn validate_session(&self, token: &str) -> ScResult<AuthCtx> {
		let token_data =
			jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
				.map_err(|err| {
					debug!("Session token rejected: {}", err);
					Error::Unauthorized
				})?;
		let claims = token_data.claims;

		let sub = claims.sub.filter(|sub| !sub.is_empty()).ok_or_else(|| {
			debug!("Session token has no subject");
			Error::Unauthorized
		})?;

		Ok(AuthCtx { sub, name: claims.name, email: claims.email, exp: Timestamp(claims.exp) })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SECRET: &[u8] = b"test secret";

	fn claims(sub: Option<&str>, exp: i64) -> SessionClaims {
		SessionClaims { sub: sub.map(Into::into), exp, name: Some("Admin".into()), email: None }
	}

	#[tokio::test]
	async fn test_valid_token() {
		let adapter = JwtAuthAdapter::new(SECRET).unwrap();
		let exp = now().0 + 3600;
		let token = issue_session_token(SECRET, &claims(Some("user-1"), exp)).unwrap();

		let ctx = adapter.validate_session(&token).await.unwrap();
		assert_eq!(ctx.sub.as_ref(), "user-1");
		assert_eq!(ctx.name.as_deref(), Some("Admin"));
		assert_eq!(ctx.exp, Timestamp(exp));
	}

	#[tokio::test]
	async fn test_expired_token() {
		let adapter = JwtAuthAdapter::new(SECRET).unwrap();
		let token = issue_session_token(SECRET, &claims(Some("user-1"), now().0 - 3600)).unwrap();

		assert!(matches!(adapter.validate_session(&token).await, Err(Error::Unauthorized)));
	}

	#[tokio::test]
	async fn test_wrong_secret() {
		let adapter = JwtAuthAdapter::new(SECRET).unwrap();
		let token =
			issue_session_token(b"another secret", &claims(Some("user-1"), now().0 + 3600)).unwrap();

		assert!(matches!(adapter.validate_session(&token).await, Err(Error::Unauthorized)));
	}

	#[tokio::test]
	async fn test_missing_subject() {
		let adapter = JwtAuthAdapter::new(SECRET).unwrap();
		let token = issue_session_token(SECRET, &claims(None, now().0 + 3600)).unwrap();

		assert!(matches!(adapter.validate_session(&token).await, Err(Error::Unauthorized)));
	}

	#[tokio::test]
	async fn test_garbage_token() {
		let adapter = JwtAuthAdapter::new(SECRET).unwrap();
		assert!(matches!(adapter.validate_session("not-a-jwt").await, Err(Error::Unauthorized)));
	}

	#[test]
	fn test_empty_secret_rejected() {
		assert!(matches!(JwtAuthAdapter::new(b""), Err(Error::ConfigError(_))));
	}
}

// vim: ts=4
