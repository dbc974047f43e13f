use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Keyed;

/// A market quote snapshot for a single symbol.
///
/// `change_pct` is always derived from the price and the previous close via
/// [`Quote::change_pct_from`]; the chart parser is the only production
/// construction site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change_pct: f64,
    pub volume: u64,
    pub market_cap: f64,
    pub observed_at: DateTime<Utc>,
}

impl Quote {
    /// Percentage change of `price` against `previous_close`.
    ///
    /// Callers must guard against a non-positive previous close; the parser
    /// drops such payloads before reaching this point.
    pub fn change_pct_from(price: f64, previous_close: f64) -> f64 {
        (price - previous_close) / previous_close * 100.0
    }

    pub fn is_gaining(&self) -> bool {
        self.change_pct > 0.0
    }
}

impl Keyed for Quote {
    fn key(&self) -> &str {
        &self.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_pct_basic() {
        assert_eq!(Quote::change_pct_from(110.0, 100.0), 10.0);
    }

    #[test]
    fn test_change_pct_decline() {
        let change = Quote::change_pct_from(95.0, 100.0);
        assert!((change - -5.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyed_by_symbol() {
        let quote = Quote {
            symbol: "AAPL".to_string(),
            price: 178.25,
            change_pct: 2.3,
            volume: 52_000_000,
            market_cap: 2_800_000_000_000.0,
            observed_at: Utc::now(),
        };
        assert_eq!(quote.key(), "AAPL");
        assert!(quote.is_gaining());
    }
}
