//! Client and parser for the public market chart endpoint.
//!
//! The quotes feed is the only feed with a live upstream. The endpoint
//! returns a deeply nested chart payload; [`parse_chart`] navigates it
//! defensively and yields an empty result for anything malformed, so a
//! broken upstream can never take the feed down.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::Quote;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the chart endpoint (read-only, no auth token required).
const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Symbol tracked when none is configured.
const DEFAULT_SYMBOL: &str = "BTC-EUR";

/// HTTP request timeout in seconds.
/// 30s allows for slow upstream responses while failing fast enough that a
/// stalled fetch releases the feed's single-flight guard promptly.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the market chart upstream.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct MarketClient {
    client: Client,
    symbol: String,
}

impl MarketClient {
    /// Create a client tracking the default symbol.
    pub fn new() -> Result<Self> {
        Self::for_symbol(DEFAULT_SYMBOL)
    }

    /// Create a client tracking a specific symbol.
    pub fn for_symbol(symbol: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            symbol: symbol.into(),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Fetch the raw chart payload for the configured symbol.
    pub async fn fetch_raw(&self) -> Result<String> {
        let url = format!("{}/{}", CHART_BASE_URL, self.symbol);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch chart data for {}", self.symbol))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("chart endpoint returned {} for {}", status, self.symbol);
        }

        response
            .text()
            .await
            .context("Failed to read chart response body")
    }
}

// Wire types for the chart payload - internal only

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Option<Chart>,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    symbol: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "previousClose")]
    previous_close: Option<f64>,
    #[serde(rename = "regularMarketVolume")]
    regular_market_volume: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    /// Close series; the upstream uses nulls for gaps.
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Parse a raw chart payload into normalized quote records.
///
/// Missing `chart.result[0]`, a missing price, or an unusable previous
/// close all yield an empty result rather than an error. The price falls
/// back from `regularMarketPrice` to the last close, the previous close
/// from `previousClose` to the first close, matching the upstream's own
/// dashboard behavior.
pub fn parse_chart(payload: &str) -> Vec<Quote> {
    let parsed: ChartResponse = match serde_json::from_str(payload) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!(error = %error, "Failed to parse chart payload");
            return Vec::new();
        }
    };

    let Some(result) = parsed
        .chart
        .and_then(|c| c.result)
        .unwrap_or_default()
        .into_iter()
        .next()
    else {
        debug!("Chart payload contained no result");
        return Vec::new();
    };

    let meta = result.meta.unwrap_or_default();
    let closes: Vec<f64> = result
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .map(|q| q.close.into_iter().flatten().collect())
        .unwrap_or_default();

    let Some(price) = meta.regular_market_price.or_else(|| closes.last().copied()) else {
        warn!("Chart payload missing a usable market price");
        return Vec::new();
    };
    let Some(previous_close) = meta.previous_close.or_else(|| closes.first().copied()) else {
        warn!("Chart payload missing a usable previous close");
        return Vec::new();
    };
    if previous_close <= 0.0 {
        warn!(previous_close, "Chart payload previous close not usable");
        return Vec::new();
    }

    let volume = meta.regular_market_volume.unwrap_or(0);

    vec![Quote {
        symbol: meta.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
        price,
        change_pct: Quote::change_pct_from(price, previous_close),
        volume,
        market_cap: price * volume as f64,
        observed_at: Utc::now(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "BTC-EUR",
                    "regularMarketPrice": 110.0,
                    "previousClose": 100.0,
                    "regularMarketVolume": 52000000
                },
                "indicators": { "quote": [{ "close": [100.0, 105.0, 110.0] }] }
            }]
        }
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let quotes = parse_chart(FULL_PAYLOAD);
        assert_eq!(quotes.len(), 1);

        let quote = &quotes[0];
        assert_eq!(quote.symbol, "BTC-EUR");
        assert_eq!(quote.price, 110.0);
        assert_eq!(quote.change_pct, 10.0);
        assert_eq!(quote.volume, 52_000_000);
        assert_eq!(quote.market_cap, 110.0 * 52_000_000.0);
    }

    #[test]
    fn test_parse_empty_result() {
        assert!(parse_chart(r#"{"chart":{"result":[]}}"#).is_empty());
        assert!(parse_chart(r#"{"chart":{}}"#).is_empty());
        assert!(parse_chart(r#"{}"#).is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(parse_chart("not json at all").is_empty());
    }

    #[test]
    fn test_parse_falls_back_to_close_series() {
        // No meta prices; the close series endpoints stand in.
        let payload = r#"{
            "chart": {
                "result": [{
                    "meta": { "symbol": "BTC-EUR" },
                    "indicators": { "quote": [{ "close": [100.0, null, 120.0] }] }
                }]
            }
        }"#;
        let quotes = parse_chart(payload);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].price, 120.0);
        assert_eq!(quotes[0].change_pct, 20.0);
        // Volume missing defaults to zero, so market cap is zero too.
        assert_eq!(quotes[0].volume, 0);
        assert_eq!(quotes[0].market_cap, 0.0);
    }

    #[test]
    fn test_parse_rejects_zero_previous_close() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "meta": { "regularMarketPrice": 5.0, "previousClose": 0.0 },
                    "indicators": { "quote": [{ "close": [] }] }
                }]
            }
        }"#;
        assert!(parse_chart(payload).is_empty());
    }

    #[test]
    fn test_parse_missing_prices_entirely() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "meta": { "symbol": "BTC-EUR" },
                    "indicators": { "quote": [{ "close": [] }] }
                }]
            }
        }"#;
        assert!(parse_chart(payload).is_empty());
    }
}
