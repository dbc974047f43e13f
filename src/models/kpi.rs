use serde::{Deserialize, Serialize};

use super::Keyed;

/// Attainment ratio (current / target) at or above which a KPI counts as
/// on track. Below it the KPI is flagged as missing its target.
const ON_TRACK_RATIO: f64 = 0.9;

/// Standing of a KPI relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KpiStatus {
    BelowTarget,
    OnTrack,
    Exceeding,
}

impl KpiStatus {
    /// Derive a status from the current value and its target.
    ///
    /// Above target is exceeding; at or above 90% of target is on track;
    /// anything lower is below target. Non-positive targets skip the ratio
    /// and compare directly.
    pub fn for_values(current: f64, target: f64) -> Self {
        if target <= 0.0 {
            return if current >= target {
                KpiStatus::Exceeding
            } else {
                KpiStatus::BelowTarget
            };
        }
        if current > target {
            KpiStatus::Exceeding
        } else if current / target >= ON_TRACK_RATIO {
            KpiStatus::OnTrack
        } else {
            KpiStatus::BelowTarget
        }
    }
}

/// A key performance indicator tracked against a target value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub key: String,
    pub current: f64,
    pub target: f64,
    pub status: KpiStatus,
}

impl Kpi {
    /// Build a KPI with the status derived from current vs target.
    pub fn new(key: impl Into<String>, current: f64, target: f64) -> Self {
        Self {
            key: key.into(),
            current,
            target,
            status: KpiStatus::for_values(current, target),
        }
    }
}

impl Keyed for Kpi {
    fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        // The four authored dashboard samples, which the policy must
        // reproduce exactly.
        assert_eq!(KpiStatus::for_values(4.5, 4.8), KpiStatus::OnTrack);
        assert_eq!(KpiStatus::for_values(25.0, 20.0), KpiStatus::Exceeding);
        assert_eq!(KpiStatus::for_values(12.0, 15.0), KpiStatus::BelowTarget);
        assert_eq!(KpiStatus::for_values(92.0, 90.0), KpiStatus::Exceeding);
    }

    #[test]
    fn test_status_at_exact_target() {
        assert_eq!(KpiStatus::for_values(20.0, 20.0), KpiStatus::OnTrack);
    }

    #[test]
    fn test_status_non_positive_target() {
        assert_eq!(KpiStatus::for_values(1.0, 0.0), KpiStatus::Exceeding);
        assert_eq!(KpiStatus::for_values(-5.0, 0.0), KpiStatus::BelowTarget);
    }

    #[test]
    fn test_new_derives_status() {
        let kpi = Kpi::new("Market Share", 12.0, 15.0);
        assert_eq!(kpi.status, KpiStatus::BelowTarget);
        assert_eq!(kpi.key(), "Market Share");
    }
}
