//! Deterministic fallback samples per feed.
//!
//! When a feed's upstream yields nothing and its mirror is empty, the
//! dashboard still has to render something plausible. These sets are fixed
//! at authoring time: two consecutive re-seeds produce identical records,
//! so a cleared mirror always comes back to the same state.
//!
//! Derived fields (trend direction, KPI status) go through the same
//! constructors as live data, so the samples can never violate the model
//! invariants.

use chrono::{DateTime, Utc};

use crate::models::{BusinessMetric, Kpi, Quote, SectorTrend};

/// Authoring timestamp stamped on sample quotes. Fixed rather than
/// wall-clock so re-seeding is bit-identical across runs.
const SAMPLE_OBSERVED_AT_SECS: i64 = 1_735_938_000; // 2025-01-03 21:00:00 UTC

fn sample_observed_at() -> DateTime<Utc> {
    DateTime::from_timestamp(SAMPLE_OBSERVED_AT_SECS, 0).unwrap_or_default()
}

/// Representative market quotes shown until live data arrives.
pub fn sample_quotes() -> Vec<Quote> {
    let observed_at = sample_observed_at();
    let quote = |symbol: &str, price: f64, change_pct: f64, volume: u64, market_cap: f64| Quote {
        symbol: symbol.to_string(),
        price,
        change_pct,
        volume,
        market_cap,
        observed_at,
    };

    vec![
        quote("AAPL", 178.25, 2.3, 52_000_000, 2_800_000_000_000.0),
        quote("GOOGL", 142.50, 1.8, 28_000_000, 1_800_000_000_000.0),
        quote("MSFT", 385.75, -0.5, 24_000_000, 2_900_000_000_000.0),
        quote("AMZN", 155.30, 3.2, 45_000_000, 1_600_000_000_000.0),
        quote("TSLA", 242.80, -1.2, 98_000_000, 770_000_000_000.0),
        quote("META", 468.90, 4.1, 18_000_000, 1_200_000_000_000.0),
    ]
}

/// Representative sector trends.
pub fn sample_trends() -> Vec<SectorTrend> {
    vec![
        SectorTrend::new(
            "Technology",
            5.2,
            "Strong growth driven by AI and cloud computing innovations",
        ),
        SectorTrend::new(
            "Healthcare",
            2.8,
            "Steady growth with biotech innovations and aging demographics",
        ),
        SectorTrend::new(
            "Finance",
            -1.2,
            "Slight decline due to interest rate concerns and regulatory pressure",
        ),
        SectorTrend::new(
            "Energy",
            3.5,
            "Rising oil prices and renewable energy investments boosting sector",
        ),
        SectorTrend::new(
            "Consumer",
            0.8,
            "Stable performance with mixed signals from retail spending",
        ),
    ]
}

/// Representative business metrics.
pub fn sample_metrics() -> Vec<BusinessMetric> {
    vec![
        BusinessMetric::new("Revenue", 1_250_000.0, "Total revenue for Q4 2024"),
        BusinessMetric::new(
            "Expenses",
            850_000.0,
            "Operating expenses including salaries and overhead",
        ),
        BusinessMetric::new("Profit", 400_000.0, "Net profit after all expenses"),
        BusinessMetric::new("Growth", 180_000.0, "Year-over-year revenue growth"),
    ]
}

/// Representative KPIs; statuses are derived from the value/target pairs.
pub fn sample_kpis() -> Vec<Kpi> {
    vec![
        Kpi::new("Customer Satisfaction", 4.5, 4.8),
        Kpi::new("Revenue Growth", 25.0, 20.0),
        Kpi::new("Market Share", 12.0, 15.0),
        Kpi::new("Employee Retention", 92.0, 90.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KpiStatus, TrendDirection};

    #[test]
    fn test_samples_are_deterministic() {
        assert_eq!(sample_quotes(), sample_quotes());
        assert_eq!(sample_trends(), sample_trends());
        assert_eq!(sample_metrics(), sample_metrics());
        assert_eq!(sample_kpis(), sample_kpis());
    }

    #[test]
    fn test_sample_set_sizes() {
        assert_eq!(sample_quotes().len(), 6);
        assert_eq!(sample_trends().len(), 5);
        assert_eq!(sample_metrics().len(), 4);
        assert_eq!(sample_kpis().len(), 4);
    }

    #[test]
    fn test_sample_trend_directions_follow_sign() {
        for trend in sample_trends() {
            assert_eq!(
                trend.direction,
                TrendDirection::from_change(trend.performance_change_pct),
                "direction out of sync for {}",
                trend.sector
            );
        }
    }

    #[test]
    fn test_sample_kpi_statuses() {
        let kpis = sample_kpis();
        assert_eq!(kpis[0].status, KpiStatus::OnTrack);
        assert_eq!(kpis[1].status, KpiStatus::Exceeding);
        assert_eq!(kpis[2].status, KpiStatus::BelowTarget);
        assert_eq!(kpis[3].status, KpiStatus::Exceeding);
    }
}
