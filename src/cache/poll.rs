//! Generic per-feed polling engine.
//!
//! Each feed is a [`PollingCache`] owning a freshness state machine and a
//! single in-flight fetch guard. Reads are cheap while the entry is fresh;
//! a stale read runs the fetch pipeline: live upstream, write-through to
//! the mirror, read-back, and a deterministic fallback seed when the
//! mirror comes back empty.
//!
//! No failure crosses `read()` - every error path degrades to the best
//! available sequence and is logged here, at the point it is swallowed.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use super::mirror::Mirror;
use crate::models::FeedKey;

/// Freshness of a feed's cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// Nothing fetched yet.
    Idle,
    /// A fetch pipeline is in flight; concurrent reads reuse the previous
    /// value instead of starting another.
    Fetching,
    /// Within the staleness window; reads are served from cache.
    Fresh,
    /// Past the window or explicitly invalidated; the next read fetches.
    Stale,
}

/// Feed-specific fetch and fallback behavior behind the generic engine.
///
/// `fetch_live` reaches the feed's live upstream, if it has one; feeds
/// without a live source return an empty batch and serve from the mirror.
/// `sort` defines the feed's presentation order, applied to every value the
/// cache returns.
pub trait FeedSource: Send + Sync + 'static {
    type Record: Clone + Send + Sync + 'static;

    fn feed(&self) -> FeedKey;

    fn fetch_live(&self) -> impl Future<Output = anyhow::Result<Vec<Self::Record>>> + Send;

    fn fallback(&self) -> Vec<Self::Record>;

    fn sort(&self, _records: &mut Vec<Self::Record>) {}
}

struct Entry<T> {
    state: FeedState,
    fetched_at: Option<Instant>,
    value: Arc<Vec<T>>,
    /// Set when an invalidation arrives mid-fetch; applied once the
    /// pipeline completes so the single-flight guard stays intact.
    invalidate_pending: bool,
}

/// Staleness-aware cache for one feed.
///
/// The entry mutex is held only across state inspection and transition,
/// never across an await; the `Fetching` state itself is the single-flight
/// guard.
pub struct PollingCache<S: FeedSource, M: Mirror<S::Record>> {
    source: S,
    mirror: Arc<M>,
    refresh_every: Duration,
    stale_after: Duration,
    entry: Mutex<Entry<S::Record>>,
}

impl<S, M> PollingCache<S, M>
where
    S: FeedSource,
    M: Mirror<S::Record>,
{
    pub fn new(source: S, mirror: Arc<M>, refresh_every: Duration, stale_after: Duration) -> Self {
        debug_assert!(
            stale_after < refresh_every,
            "interactive reads between timer firings must reuse the cache"
        );
        Self {
            source,
            mirror,
            refresh_every,
            stale_after,
            entry: Mutex::new(Entry {
                state: FeedState::Idle,
                fetched_at: None,
                value: Arc::new(Vec::new()),
                invalidate_pending: false,
            }),
        }
    }

    pub fn feed(&self) -> FeedKey {
        self.source.feed()
    }

    /// Background refresh cadence; the registry drives a timer off this.
    pub fn refresh_every(&self) -> Duration {
        self.refresh_every
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    pub fn state(&self) -> FeedState {
        self.lock_entry().state
    }

    /// Current cached value without triggering a fetch.
    pub fn current(&self) -> Arc<Vec<S::Record>> {
        Arc::clone(&self.lock_entry().value)
    }

    /// Read the feed, fetching if the entry is stale.
    ///
    /// Never fails: a read during an in-flight fetch returns the previous
    /// value, and a failing pipeline degrades to whatever the mirror or
    /// fallback can provide.
    pub async fn read(&self) -> Arc<Vec<S::Record>> {
        {
            let mut entry = self.lock_entry();
            match entry.state {
                FeedState::Fetching => return Arc::clone(&entry.value),
                FeedState::Fresh
                    if entry
                        .fetched_at
                        .is_some_and(|at| at.elapsed() < self.stale_after) =>
                {
                    return Arc::clone(&entry.value);
                }
                _ => entry.state = FeedState::Fetching,
            }
        }

        let value = Arc::new(self.run_pipeline().await);

        let mut entry = self.lock_entry();
        entry.value = Arc::clone(&value);
        entry.fetched_at = Some(Instant::now());
        entry.state = if entry.invalidate_pending {
            FeedState::Stale
        } else {
            FeedState::Fresh
        };
        entry.invalidate_pending = false;
        value
    }

    /// Mark the entry stale so the next read re-runs the fetch pipeline.
    pub fn invalidate(&self) {
        let mut entry = self.lock_entry();
        if entry.state == FeedState::Fetching {
            entry.invalidate_pending = true;
        } else {
            entry.state = FeedState::Stale;
        }
    }

    /// Fetch pipeline: live upstream, write-through, read-back, fallback.
    ///
    /// Fallback records are generated whenever the mirror read comes back
    /// empty - not only on first run - so an externally cleared mirror is
    /// re-seeded on the next cycle.
    async fn run_pipeline(&self) -> Vec<S::Record> {
        let feed = self.source.feed();

        let live = match self.source.fetch_live().await {
            Ok(records) => records,
            Err(error) => {
                warn!(%feed, error = %error, "Live fetch failed, serving from mirror");
                Vec::new()
            }
        };

        self.submit_all(&live).await;

        let mut records = match self.mirror.get_all().await {
            Ok(records) => records,
            Err(error) => {
                warn!(%feed, error = %error, "Mirror read failed");
                Vec::new()
            }
        };

        if records.is_empty() {
            debug!(%feed, "Mirror empty, seeding fallback samples");
            records = self.source.fallback();
            self.submit_all(&records).await;
        }

        self.source.sort(&mut records);
        debug!(%feed, count = records.len(), "Fetch pipeline complete");
        records
    }

    /// Persist a batch, tolerating per-record failures.
    async fn submit_all(&self, records: &[S::Record]) {
        let feed = self.source.feed();
        for record in records {
            if let Err(error) = self.mirror.submit(record).await {
                warn!(%feed, error = %error, "Mirror write failed, continuing");
            }
        }
    }

    fn lock_entry(&self) -> MutexGuard<'_, Entry<S::Record>> {
        // A panic while holding the lock leaves only a state enum and an
        // Arc behind; the entry is still usable, so recover the guard.
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
