//! Domain models for the dashboard feeds.
//!
//! This module contains the record types carried by the four feed caches:
//!
//! - `Quote`: market quote snapshots from the live chart upstream
//! - `SectorTrend`: sector performance with a derived direction
//! - `BusinessMetric`: named business figures
//! - `Kpi`: key performance indicators with a derived status
//!
//! Derived state (`change_pct`, `TrendDirection`, `KpiStatus`) is computed
//! at construction so records never carry an inconsistent pairing.

pub mod kpi;
pub mod metric;
pub mod quote;
pub mod trend;

pub use kpi::{Kpi, KpiStatus};
pub use metric::BusinessMetric;
pub use quote::Quote;
pub use trend::{SectorTrend, TrendDirection};

use std::fmt;

/// One independently scheduled category of cached dashboard data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKey {
    Quotes,
    Trends,
    Metrics,
    Kpis,
}

impl FeedKey {
    /// Stable lowercase name, used for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            FeedKey::Quotes => "quotes",
            FeedKey::Trends => "trends",
            FeedKey::Metrics => "metrics",
            FeedKey::Kpis => "kpis",
        }
    }
}

impl fmt::Display for FeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity used by the backend mirror to upsert records within a feed.
///
/// Keys are unique within a feed snapshot (symbol, sector, metric name,
/// KPI key); submitting a record with an existing key replaces it.
pub trait Keyed {
    fn key(&self) -> &str;
}
