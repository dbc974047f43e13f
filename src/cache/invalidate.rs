//! Cross-feed invalidation.
//!
//! A successful AI interaction may have acted on the business data, so the
//! chat layer invalidates every feed afterwards; the next read on each one
//! re-runs its fetch pipeline even inside the staleness window.

use std::sync::Arc;

use tracing::debug;

use super::mirror::Mirror;
use super::poll::{FeedSource, PollingCache};

/// Object-safe invalidation seam implemented by every feed cache.
pub trait Invalidate: Send + Sync {
    fn invalidate(&self);
}

impl<S, M> Invalidate for PollingCache<S, M>
where
    S: FeedSource,
    M: Mirror<S::Record>,
{
    fn invalidate(&self) {
        PollingCache::invalidate(self);
    }
}

/// Fans an invalidation out to every registered feed.
///
/// Idempotent, with no ordering requirement among feeds.
pub struct InvalidationBus {
    feeds: Vec<Arc<dyn Invalidate>>,
}

impl InvalidationBus {
    pub fn new(feeds: Vec<Arc<dyn Invalidate>>) -> Self {
        Self { feeds }
    }

    /// Mark every feed stale, forcing the next read to refetch.
    pub fn invalidate_all(&self) {
        debug!(feeds = self.feeds.len(), "Invalidating all feeds");
        for feed in &self.feeds {
            feed.invalidate();
        }
    }
}
