//! Construction and scheduling of the four dashboard feeds.
//!
//! The registry owns one [`PollingCache`] per feed, each with its own
//! mirror partition and refresh cadence, and the background timers that
//! keep them warm. Dropping the registry cancels every timer, so no
//! callback can outlive the caches it references.

use std::sync::Arc;
use std::time::Duration;

use futures::join;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::fallback;
use super::invalidate::{Invalidate, InvalidationBus};
use super::mirror::{MemoryMirror, Mirror};
use super::poll::{FeedSource, PollingCache};
use crate::api::market::{parse_chart, MarketClient};
use crate::models::{BusinessMetric, FeedKey, Kpi, Quote, SectorTrend};

// ============================================================================
// Constants
// ============================================================================

/// Market quotes move fastest: refresh every 45 seconds, reuse the cached
/// snapshot for interactive reads within 30 seconds.
const QUOTES_REFRESH: Duration = Duration::from_secs(45);
const QUOTES_STALE: Duration = Duration::from_secs(30);

/// The remaining feeds change slowly: refresh every 60 seconds, stale
/// after 45.
const FEED_REFRESH: Duration = Duration::from_secs(60);
const FEED_STALE: Duration = Duration::from_secs(45);

// ============================================================================
// Feed definitions
// ============================================================================

/// Market quotes - the only feed with a live upstream.
pub struct QuoteFeed {
    market: MarketClient,
}

impl FeedSource for QuoteFeed {
    type Record = Quote;

    fn feed(&self) -> FeedKey {
        FeedKey::Quotes
    }

    async fn fetch_live(&self) -> anyhow::Result<Vec<Quote>> {
        let payload = self.market.fetch_raw().await?;
        Ok(parse_chart(&payload))
    }

    fn fallback(&self) -> Vec<Quote> {
        fallback::sample_quotes()
    }
}

/// Sector trends, served from the mirror and ordered by performance.
pub struct TrendFeed;

impl FeedSource for TrendFeed {
    type Record = SectorTrend;

    fn feed(&self) -> FeedKey {
        FeedKey::Trends
    }

    async fn fetch_live(&self) -> anyhow::Result<Vec<SectorTrend>> {
        Ok(Vec::new())
    }

    fn fallback(&self) -> Vec<SectorTrend> {
        fallback::sample_trends()
    }

    fn sort(&self, records: &mut Vec<SectorTrend>) {
        // Best performing sector first.
        records.sort_by(|left, right| {
            right
                .performance_change_pct
                .total_cmp(&left.performance_change_pct)
        });
    }
}

/// Business metrics, served from the mirror and ordered by name.
pub struct MetricFeed;

impl FeedSource for MetricFeed {
    type Record = BusinessMetric;

    fn feed(&self) -> FeedKey {
        FeedKey::Metrics
    }

    async fn fetch_live(&self) -> anyhow::Result<Vec<BusinessMetric>> {
        Ok(Vec::new())
    }

    fn fallback(&self) -> Vec<BusinessMetric> {
        fallback::sample_metrics()
    }

    fn sort(&self, records: &mut Vec<BusinessMetric>) {
        records.sort_by(|left, right| left.name.cmp(&right.name));
    }
}

/// KPIs, served from the mirror and ordered by key.
pub struct KpiFeed;

impl FeedSource for KpiFeed {
    type Record = Kpi;

    fn feed(&self) -> FeedKey {
        FeedKey::Kpis
    }

    async fn fetch_live(&self) -> anyhow::Result<Vec<Kpi>> {
        Ok(Vec::new())
    }

    fn fallback(&self) -> Vec<Kpi> {
        fallback::sample_kpis()
    }

    fn sort(&self, records: &mut Vec<Kpi>) {
        records.sort_by(|left, right| left.key.cmp(&right.key));
    }
}

pub type QuoteCache = PollingCache<QuoteFeed, MemoryMirror<Quote>>;
pub type TrendCache = PollingCache<TrendFeed, MemoryMirror<SectorTrend>>;
pub type MetricCache = PollingCache<MetricFeed, MemoryMirror<BusinessMetric>>;
pub type KpiCache = PollingCache<KpiFeed, MemoryMirror<Kpi>>;

// ============================================================================
// Registry
// ============================================================================

/// The four feed caches plus their refresh timers.
pub struct FeedRegistry {
    pub quotes: Arc<QuoteCache>,
    pub trends: Arc<TrendCache>,
    pub metrics: Arc<MetricCache>,
    pub kpis: Arc<KpiCache>,
    timers: Vec<JoinHandle<()>>,
}

impl FeedRegistry {
    /// Build the four caches. Timers are not started until
    /// [`FeedRegistry::start_refresh_timers`] is called.
    pub fn new(market: MarketClient) -> Self {
        Self {
            quotes: Arc::new(PollingCache::new(
                QuoteFeed { market },
                Arc::new(MemoryMirror::new()),
                QUOTES_REFRESH,
                QUOTES_STALE,
            )),
            trends: Arc::new(PollingCache::new(
                TrendFeed,
                Arc::new(MemoryMirror::new()),
                FEED_REFRESH,
                FEED_STALE,
            )),
            metrics: Arc::new(PollingCache::new(
                MetricFeed,
                Arc::new(MemoryMirror::new()),
                FEED_REFRESH,
                FEED_STALE,
            )),
            kpis: Arc::new(PollingCache::new(
                KpiFeed,
                Arc::new(MemoryMirror::new()),
                FEED_REFRESH,
                FEED_STALE,
            )),
            timers: Vec::new(),
        }
    }

    /// Spawn one background refresh timer per feed.
    ///
    /// Each timer fires immediately to warm its cache, then on the feed's
    /// cadence. Calling this twice spawns duplicate timers; the registry
    /// does not guard against it.
    pub fn start_refresh_timers(&mut self) {
        info!("Starting feed refresh timers");
        self.timers.push(Self::spawn_timer(Arc::clone(&self.quotes)));
        self.timers.push(Self::spawn_timer(Arc::clone(&self.trends)));
        self.timers
            .push(Self::spawn_timer(Arc::clone(&self.metrics)));
        self.timers.push(Self::spawn_timer(Arc::clone(&self.kpis)));
    }

    fn spawn_timer<S, M>(cache: Arc<PollingCache<S, M>>) -> JoinHandle<()>
    where
        S: FeedSource,
        M: Mirror<S::Record>,
    {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cache.refresh_every());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                cache.read().await;
            }
        })
    }

    /// Refresh every feed concurrently, e.g. to warm the dashboard before
    /// first render.
    pub async fn refresh_all(&self) {
        join!(
            self.quotes.read(),
            self.trends.read(),
            self.metrics.read(),
            self.kpis.read(),
        );
    }

    /// Bus that marks every feed stale, used after AI interactions.
    pub fn invalidation_bus(&self) -> InvalidationBus {
        InvalidationBus::new(vec![
            Arc::clone(&self.quotes) as Arc<dyn Invalidate>,
            Arc::clone(&self.trends) as Arc<dyn Invalidate>,
            Arc::clone(&self.metrics) as Arc<dyn Invalidate>,
            Arc::clone(&self.kpis) as Arc<dyn Invalidate>,
        ])
    }

    /// Cancel all refresh timers. Called from `Drop` as well, so a
    /// discarded registry leaves no callbacks behind.
    pub fn shutdown(&mut self) {
        for timer in self.timers.drain(..) {
            timer.abort();
        }
    }
}

impl Drop for FeedRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
