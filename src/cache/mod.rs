//! Per-feed caching engine.
//!
//! This module provides the `PollingCache` that keeps one feed's records
//! fresh, the `Mirror` write-through boundary it persists into, the
//! deterministic fallback samples used when both upstream and mirror are
//! empty, and the `FeedRegistry` that wires the four dashboard feeds
//! together with their refresh timers.
//!
//! Feeds:
//! - quotes (live chart upstream, 45s refresh / 30s stale)
//! - trends, metrics, kpis (mirror/fallback only, 60s refresh / 45s stale)

pub mod fallback;
pub mod invalidate;
pub mod mirror;
pub mod poll;
pub mod registry;

pub use invalidate::{Invalidate, InvalidationBus};
pub use mirror::{MemoryMirror, Mirror};
pub use poll::{FeedSource, FeedState, PollingCache};
pub use registry::FeedRegistry;
