//! In-process cache of rendered output, keyed by path

use async_trait::async_trait;
use hyper::body::Bytes;
use lru::LruCache;
use std::num::NonZeroUsize;

use sitecfg_types::cache_adapter::{CacheInvalidator, InvalidationScope};

use crate::prelude::*;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
	Some(capacity) => capacity,
	None => NonZeroUsize::MIN,
};

/// LRU cache for rendered pages
#[derive(Debug)]
pub struct PageCache {
	pages: parking_lot::RwLock<LruCache<Box<str>, Bytes>>,
}

impl PageCache {
	pub fn new(capacity: usize) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
		Self { pages: parking_lot::RwLock::new(LruCache::new(capacity)) }
	}

	pub fn get(&self, path: &str) -> Option<Bytes> {
		let mut pages = self.pages.write();
		pages.get(path).cloned()
	}

	pub fn put(&self, path: impl Into<Box<str>>, content: Bytes) {
		let mut pages = self.pages.write();
		pages.put(path.into(), content);
	}

	pub fn len(&self) -> usize {
		self.pages.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.pages.read().is_empty()
	}

	/// Removes every page covered by `scope`, returns how many were removed
	pub fn remove(&self, scope: &InvalidationScope) -> usize {
		let mut pages = self.pages.write();
		let stale: Vec<Box<str>> =
			pages.iter().filter(|(path, _)| scope.covers(path)).map(|(path, _)| path.clone()).collect();
		for path in &stale {
			pages.pop(path);
		}
		stale.len()
	}
}

impl Default for PageCache {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY.get())
	}
}

#[async_trait]
impl CacheInvalidator for PageCache {
	async fn invalidate(&self, scope: &InvalidationScope) -> ScResult<()> {
		let removed = self.remove(scope);
		debug!(path = scope.path(), removed, "Page cache invalidated");
		Ok(())
	}
}


// vim: ts=4
