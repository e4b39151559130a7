//! CLOB public endpoints: order book snapshots and price history

use super::get_json;
use crate::error::ScreenerResult;
use crate::types::{de_f64, de_opt_i64, de_or_default};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone)]
pub struct ClobClient {
    client: Client,
    base_url: String,
}

/// A raw book level; the CLOB sends decimals as strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLevel {
    pub price: String,
    pub size: String,
}

impl RawLevel {
    pub fn new(price: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            size: size.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub bids: Vec<RawLevel>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub asks: Vec<RawLevel>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl OrderBookSnapshot {
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// One price-history sample: unix seconds and probability in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub t: Option<i64>,
    #[serde(default, deserialize_with = "de_f64")]
    pub p: f64,
}

#[derive(Debug, Deserialize)]
struct PriceHistoryResponse {
    #[serde(default, deserialize_with = "de_or_default")]
    history: Vec<PricePoint>,
}

/// Price-history window accepted by `/prices-history`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryInterval {
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1w")]
    Week,
    Max,
}

impl HistoryInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "1d",
            Self::Week => "1w",
            Self::Max => "max",
        }
    }

    /// Sample resolution in minutes
    pub fn fidelity(&self) -> u32 {
        match self {
            Self::Day => 5,
            Self::Week => 60,
            Self::Max => 1440,
        }
    }
}

impl ClobClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// GET /book?token_id={token_id}
    pub async fn get_order_book(&self, token_id: &str) -> ScreenerResult<OrderBookSnapshot> {
        let url = format!("{}/book", self.base_url);
        debug!(token_id, "Fetching order book");
        let book: OrderBookSnapshot = get_json(
            &self.client,
            "clob book",
            &url,
            &[("token_id", token_id.to_string())],
        )
        .await?;
        debug!(bids = book.bids.len(), asks = book.asks.len(), "Order book fetched");
        Ok(book)
    }

    /// GET /prices-history?market={token_id}&interval=..&fidelity=..
    pub async fn get_price_history(
        &self,
        token_id: &str,
        interval: HistoryInterval,
    ) -> ScreenerResult<Vec<PricePoint>> {
        let url = format!("{}/prices-history", self.base_url);
        let query = [
            ("market", token_id.to_string()),
            ("interval", interval.as_str().to_string()),
            ("fidelity", interval.fidelity().to_string()),
        ];
        let resp: PriceHistoryResponse =
            get_json(&self.client, "clob prices-history", &url, &query).await?;
        debug!(points = resp.history.len(), "Price history fetched");
        Ok(resp.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_decodes_with_missing_sides() {
        let book: OrderBookSnapshot = serde_json::from_value(serde_json::json!({
            "market": "0xabc",
            "bids": [{ "price": "0.48", "size": "1200" }]
        }))
        .unwrap();
        assert_eq!(book.bids, vec![RawLevel::new("0.48", "1200")]);
        assert!(book.asks.is_empty());
        assert!(!book.is_empty());
    }

    #[test]
    fn test_history_point_decodes_strings() {
        let resp: PriceHistoryResponse = serde_json::from_value(serde_json::json!({
            "history": [{ "t": 1700000000, "p": 0.52 }, { "t": "1700003600", "p": "0.55" }]
        }))
        .unwrap();
        assert_eq!(resp.history.len(), 2);
        assert_eq!(resp.history[1].t, Some(1_700_003_600));
        assert_eq!(resp.history[1].p, 0.55);
    }
}
