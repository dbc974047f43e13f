use serde::{Deserialize, Serialize};

use super::Keyed;

/// Direction of a sector's recent movement, derived from the sign of its
/// performance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    /// Direction implied by a performance change: positive is up, negative
    /// is down, exactly zero is flat.
    pub fn from_change(performance_change_pct: f64) -> Self {
        if performance_change_pct > 0.0 {
            TrendDirection::Up
        } else if performance_change_pct < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }
}

/// Performance of one market sector with a short narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorTrend {
    pub sector: String,
    pub performance_change_pct: f64,
    pub direction: TrendDirection,
    pub narrative: String,
}

impl SectorTrend {
    /// Build a trend with the direction derived from the change sign.
    pub fn new(
        sector: impl Into<String>,
        performance_change_pct: f64,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            sector: sector.into(),
            performance_change_pct,
            direction: TrendDirection::from_change(performance_change_pct),
            narrative: narrative.into(),
        }
    }
}

impl Keyed for SectorTrend {
    fn key(&self) -> &str {
        &self.sector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_change() {
        assert_eq!(TrendDirection::from_change(5.2), TrendDirection::Up);
        assert_eq!(TrendDirection::from_change(-1.2), TrendDirection::Down);
        assert_eq!(TrendDirection::from_change(0.0), TrendDirection::Flat);
    }

    #[test]
    fn test_new_derives_direction() {
        let trend = SectorTrend::new("Finance", -1.2, "Rate pressure");
        assert_eq!(trend.direction, TrendDirection::Down);
        assert_eq!(trend.key(), "Finance");
    }
}
