//! Downstream cache invalidation.
//!
//! Anything that caches output derived from settings (rendered pages, edge
//! caches, a frontend's data cache) is told to recompute through this trait.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use crate::prelude::*;

/// Part of the site whose cached output becomes stale
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "path", rename_all = "lowercase")]
pub enum InvalidationScope {
	/// A single page
	Page(Box<str>),
	/// A path and everything rendered beneath it
	Layout(Box<str>),
}

impl InvalidationScope {
	/// The whole site
	pub fn global() -> Self {
		InvalidationScope::Layout("/".into())
	}

	pub fn path(&self) -> &str {
		match self {
			InvalidationScope::Page(path) | InvalidationScope::Layout(path) => path,
		}
	}

	/// Whether cached output stored under `path` is covered by this scope
	pub fn covers(&self, path: &str) -> bool {
		match self {
			InvalidationScope::Page(p) => p.as_ref() == path,
			InvalidationScope::Layout(p) => {
				let prefix = p.trim_end_matches('/');
				prefix.is_empty()
					|| path == prefix
					|| path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
			}
		}
	}
}

#[async_trait]
pub trait CacheInvalidator: Debug + Send + Sync {
	/// Marks cached output in `scope` stale.
	///
	/// Callers treat this as best-effort: an error is logged, never retried.
	async fn invalidate(&self, scope: &InvalidationScope) -> ScResult<()>;
}


// vim: ts=4
