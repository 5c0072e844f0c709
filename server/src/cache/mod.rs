//! Cache invalidation adapters
//!
//! - **PageCache** (`page_cache.rs`): in-process LRU of rendered output
//! - **RevalidateWebhook** (`revalidate.rs`): asks a frontend to revalidate
//! - **CacheInvalidators**: fans one invalidation out to several adapters

use async_trait::async_trait;
use std::sync::Arc;

use sitecfg_types::cache_adapter::{CacheInvalidator, InvalidationScope};

use crate::prelude::*;

pub mod page_cache;
pub mod revalidate;

pub use page_cache::PageCache;
pub use revalidate::RevalidateWebhook;

/// Invalidates every registered cache.
///
/// All invalidators are attempted even if one fails. The first error is
/// returned once all of them ran.
#[derive(Debug, Default)]
pub struct CacheInvalidators {
	invalidators: Vec<Arc<dyn CacheInvalidator>>,
}

impl CacheInvalidators {
	pub fn new() -> Self {
		Self { invalidators: Vec::new() }
	}

	pub fn push(&mut self, invalidator: Arc<dyn CacheInvalidator>) {
		self.invalidators.push(invalidator);
	}

	pub fn len(&self) -> usize {
		self.invalidators.len()
	}

	pub fn is_empty(&self) -> bool {
		self.invalidators.is_empty()
	}
}

#[async_trait]
impl CacheInvalidator for CacheInvalidators {
	async fn invalidate(&self, scope: &InvalidationScope) -> ScResult<()> {
		let mut first_err = None;
		for invalidator in &self.invalidators {
			if let Err(err) = invalidator.invalidate(scope).await {
				warn!("Invalidator {:?} failed: {}", invalidator, err);
				first_err.get_or_insert(err);
			}
		}

		match first_err {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use parking_lot::Mutex;

	#[derive(Debug, Default)]
	struct Recorder {
		seen: Mutex<Vec<InvalidationScope>>,
		fail: bool,
	}

	#[async_trait]
	impl CacheInvalidator for Recorder {
		async fn invalidate(&self, scope: &InvalidationScope) -> ScResult<()> {
			self.seen.lock().push(scope.clone());
			if self.fail { Err(Error::Internal("unreachable".into())) } else { Ok(()) }
		}
	}

	#[tokio::test]
	async fn test_empty_fan_out_succeeds() {
		let invalidators = CacheInvalidators::new();
		assert!(invalidators.invalidate(&InvalidationScope::global()).await.is_ok());
	}

	#[tokio::test]
	async fn test_failure_does_not_stop_others() {
		let failing = Arc::new(Recorder { fail: true, ..Recorder::default() });
		let healthy = Arc::new(Recorder::default());

		let mut invalidators = CacheInvalidators::new();
		invalidators.push(failing.clone());
		invalidators.push(healthy.clone());
		assert_eq!(invalidators.len(), 2);

		let res = invalidators.invalidate(&InvalidationScope::global()).await;
		assert!(matches!(res, Err(Error::Internal(_))));
		assert_eq!(failing.seen.lock().len(), 1);
		assert_eq!(*healthy.seen.lock(), vec![InvalidationScope::global()]);
	}
}

// vim: ts=4
