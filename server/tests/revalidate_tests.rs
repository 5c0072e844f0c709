//! Revalidation webhook against a local endpoint

use axum::{
	Json, Router,
	extract::State,
	http::{HeaderMap, StatusCode, header},
	routing::post,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use sitecfg::cache::RevalidateWebhook;
use sitecfg::types::cache_adapter::{CacheInvalidator, InvalidationScope};
use sitecfg::types::prelude::Error;

#[derive(Clone, Default)]
struct Received {
	calls: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn revalidate(
	State(received): State<Received>,
	headers: HeaderMap,
	Json(body): Json<Value>,
) -> StatusCode {
	let auth = headers.get(header::AUTHORIZATION).and_then(|h| h.to_str().ok()).map(String::from);
	received.calls.lock().push((auth, body));
	StatusCode::OK
}

async fn start_endpoint() -> (String, Received) {
	let received = Received::default();
	let router = Router::new()
		.route("/api/revalidate", post(revalidate))
		.route("/api/broken", post(async || (StatusCode::INTERNAL_SERVER_ERROR, "boom")))
		.with_state(received.clone());

	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move { axum::serve(listener, router).await });

	(format!("http://{}", addr), received)
}

#[tokio::test]
async fn test_posts_scope_with_secret() {
	let (base, received) = start_endpoint().await;
	let webhook =
		RevalidateWebhook::new(&format!("{}/api/revalidate", base), Some("hook-secret")).unwrap();

	webhook.invalidate(&InvalidationScope::global()).await.unwrap();

	let calls = received.calls.lock().clone();
	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].0.as_deref(), Some("Bearer hook-secret"));
	assert_eq!(calls[0].1, json!({ "type": "layout", "path": "/" }));
}

#[tokio::test]
async fn test_no_secret_no_header() {
	let (base, received) = start_endpoint().await;
	let webhook = RevalidateWebhook::new(&format!("{}/api/revalidate", base), None).unwrap();

	webhook.invalidate(&InvalidationScope::Page("/about".into())).await.unwrap();

	let calls = received.calls.lock().clone();
	assert_eq!(calls[0].0, None);
	assert_eq!(calls[0].1, json!({ "type": "page", "path": "/about" }));
}

#[tokio::test]
async fn test_non_success_status_is_error() {
	let (base, _) = start_endpoint().await;
	let webhook = RevalidateWebhook::new(&format!("{}/api/broken", base), None).unwrap();

	match webhook.invalidate(&InvalidationScope::global()).await {
		Err(Error::Internal(msg)) => assert!(msg.contains("500") && msg.contains("boom"), "{}", msg),
		other => panic!("Expected error, got {:?}", other),
	}
}

#[tokio::test]
async fn test_unreachable_endpoint_is_error() {
	// Bind and drop to get a port nobody listens on
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let webhook = RevalidateWebhook::new(&format!("http://{}/api/revalidate", addr), None)
		.unwrap()
		.with_timeout(Duration::from_secs(2));

	assert!(webhook.invalidate(&InvalidationScope::global()).await.is_err());
}

// vim: ts=4
