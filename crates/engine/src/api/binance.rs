//! Binance public API client for the status-bar ticker (no authentication required)

use super::get_json;
use crate::error::ScreenerResult;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Symbols shown in the status bar
pub const TICKER_SYMBOLS: [&str; 3] = ["BTCUSDT", "ETHUSDT", "SOLUSDT"];

/// Binance public market data client
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

/// Binance 24h ticker statistics
#[derive(Debug, Clone, Deserialize)]
pub struct TickerStats {
    pub symbol: String,
    #[serde(rename = "priceChange")]
    pub price_change: String,
    #[serde(rename = "priceChangePercent")]
    pub price_change_percent: String,
    #[serde(rename = "highPrice")]
    pub high_price: String,
    #[serde(rename = "lowPrice")]
    pub low_price: String,
    #[serde(rename = "volume")]
    pub volume: String,
    #[serde(rename = "lastPrice")]
    pub last_price: String,
}

/// A ticker row ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerQuote {
    /// Base asset, e.g. `BTC`
    pub asset: String,
    pub price: f64,
    pub change_pct: f64,
}

impl From<&TickerStats> for TickerQuote {
    fn from(stats: &TickerStats) -> Self {
        Self {
            asset: stats
                .symbol
                .strip_suffix("USDT")
                .unwrap_or(&stats.symbol)
                .to_string(),
            price: stats.last_price.parse().unwrap_or(0.0),
            change_pct: stats.price_change_percent.parse().unwrap_or(0.0),
        }
    }
}

impl BinanceClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get 24h ticker statistics
    pub async fn get_24h_stats(&self, symbol: &str) -> ScreenerResult<TickerStats> {
        let url = format!("{}/api/v3/ticker/24hr", self.base_url);
        debug!(symbol, "Fetching 24h ticker from Binance");
        get_json(
            &self.client,
            "binance ticker",
            &url,
            &[("symbol", symbol.to_string())],
        )
        .await
    }
}
