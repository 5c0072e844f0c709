//! Revalidation webhook
//!
//! Frontends that cache data derived from settings expose an endpoint which
//! marks a path stale. This adapter POSTs the invalidation scope to it:
//!
//! ```text
//! POST <url>
//! Authorization: Bearer <secret>
//! {"type": "layout", "path": "/"}
//! ```

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Uri, header};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use std::time::Duration;

use sitecfg_types::cache_adapter::{CacheInvalidator, InvalidationScope};

use crate::prelude::*;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RevalidateWebhook {
	url: Uri,
	secret: Option<Box<str>>,
	timeout: Duration,
	client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl std::fmt::Debug for RevalidateWebhook {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RevalidateWebhook")
			.field("url", &self.url)
			.field("timeout", &self.timeout)
			.finish_non_exhaustive()
	}
}

impl RevalidateWebhook {
	pub fn new(url: &str, secret: Option<&str>) -> ScResult<Self> {
		let url: Uri = url
			.parse()
			.map_err(|err| Error::ConfigError(format!("Invalid revalidation URL '{}': {}", url, err)))?;
		if !matches!(url.scheme_str(), Some("http" | "https")) {
			return Err(Error::ConfigError(format!("Unsupported revalidation URL: {}", url)));
		}

		// Both ring and aws-lc-rs are linked, so rustls cannot pick a default itself
		let connector = HttpsConnectorBuilder::new()
			.with_provider_and_webpki_roots(rustls::crypto::aws_lc_rs::default_provider())
			.map_err(|err| Error::ConfigError(format!("TLS error: {}", err)))?
			.https_or_http()
			.enable_http1()
			.build();
		let client = Client::builder(TokioExecutor::new()).build(connector);

		Ok(Self { url, secret: secret.map(Into::into), timeout: DEFAULT_TIMEOUT, client })
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

#[async_trait]
impl CacheInvalidator for RevalidateWebhook {
	async fn invalidate(&self, scope: &InvalidationScope) -> ScResult<()> {
		let body = serde_json::to_vec(scope)?;

		let mut builder = Request::builder()
			.method(Method::POST)
			.uri(self.url.clone())
			.header(header::CONTENT_TYPE, "application/json");
		if let Some(secret) = &self.secret {
			builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", secret));
		}
		let request = builder
			.body(Full::new(Bytes::from(body)))
			.map_err(|err| Error::Internal(format!("Request build error: {}", err)))?;

		let response = tokio::time::timeout(self.timeout, self.client.request(request))
			.await
			.map_err(|_| Error::Internal(format!("Revalidation timed out after {:?}", self.timeout)))?
			.map_err(|err| Error::Internal(format!("Network error: {}", err)))?;

		let status = response.status();
		if status.is_success() {
			debug!(path = scope.path(), "Revalidation requested");
			Ok(())
		} else {
			let body_bytes = response.into_body().collect().await.ok().map(|b| b.to_bytes());
			let body_str =
				body_bytes.as_ref().and_then(|b| std::str::from_utf8(b).ok()).unwrap_or("");
			Err(Error::Internal(format!("HTTP {}: {}", status, body_str)))
		}
	}
}


// vim: ts=4
