//! bizcache - data-synchronization core for the AutoBiz operations dashboard.
//!
//! The crate keeps four business feeds (market quotes, sector trends,
//! business metrics, KPIs) useful against unreliable upstreams, and fronts
//! the AI assistant behind a proxy that never fails visibly:
//!
//! - [`FeedRegistry`] owns one [`PollingCache`] per feed, each with its own
//!   refresh timer, staleness window, and single-flight fetch guard.
//! - Live data flows upstream -> backend mirror -> cache; when both are
//!   empty, a deterministic fallback set re-seeds the mirror.
//! - [`AiProxy`] resolves a completion model once per process and maps every
//!   provider failure into a structured degraded response instead of an
//!   error.
//!
//! The rendering layer is a separate consumer of this crate and installs its
//! own `tracing` subscriber; this library only emits.

pub mod ai;
pub mod api;
pub mod cache;
pub mod config;
pub mod models;

pub use ai::{AiProxy, AiRequest, AiResponse, ModelResolver};
pub use api::{ErrorKind, GeminiClient, MarketClient};
pub use cache::{FeedRegistry, InvalidationBus, MemoryMirror, PollingCache};
pub use config::Config;
pub use models::{BusinessMetric, FeedKey, Kpi, KpiStatus, Quote, SectorTrend, TrendDirection};
