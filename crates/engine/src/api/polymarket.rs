//! Polymarket Data API client: public endpoints, no authentication required
//!
//! Uses `data-api.polymarket.com` for holders, trades, positions and the PNL leaderboard.

use super::get_json;
use crate::error::ScreenerResult;
use crate::types::{de_f64, de_opt_f64, de_opt_i64, Outcome};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Polymarket Data API client
#[derive(Clone)]
pub struct PolymarketDataClient {
    client: Client,
    base_url: String,
}

// ---------------------------------------------------------------------------
// Deserialization structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub rank: Option<i64>,
    pub proxy_wallet: Option<String>,
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub vol: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub pnl: Option<f64>,
    pub profile_image: Option<String>,
    pub x_username: Option<String>,
    pub verified_badge: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderPosition {
    pub proxy_wallet: Option<String>,
    pub asset: Option<String>,
    pub condition_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub avg_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub current_value: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub cash_pnl: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub percent_pnl: Option<f64>,
    pub title: Option<String>,
    pub outcome: Option<String>,
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub cur_price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderTrade {
    pub proxy_wallet: Option<String>,
    pub side: Option<String>,
    pub asset: Option<String>,
    pub condition_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub size: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub timestamp: Option<i64>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub event_slug: Option<String>,
    pub outcome: Option<String>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub outcome_index: Option<i64>,
    pub name: Option<String>,
    pub pseudonym: Option<String>,
    pub transaction_hash: Option<String>,
}

impl TraderTrade {
    /// Notional in USDC (size × price)
    pub fn notional(&self) -> f64 {
        self.size.unwrap_or(0.0) * self.price.unwrap_or(0.0)
    }

    pub fn is_sell(&self) -> bool {
        self.side
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("SELL"))
    }
}

/// A holder of one outcome token in a market.
///
/// Accepts the flat `{address, balance, outcome}` shape as well as the Data
/// API's `{proxyWallet, amount, outcomeIndex}` entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketHolder {
    #[serde(default, alias = "proxyWallet")]
    pub address: String,
    #[serde(default, alias = "amount", deserialize_with = "de_f64")]
    pub balance: f64,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub outcome_index: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub pnl: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl MarketHolder {
    pub fn outcome_side(&self) -> Outcome {
        let is_yes = match self.outcome.as_deref() {
            Some(o) => o.eq_ignore_ascii_case("yes"),
            None => self.outcome_index == Some(0),
        };
        if is_yes {
            Outcome::Yes
        } else {
            Outcome::No
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenHolders {
    #[allow(dead_code)]
    token: Option<String>,
    holders: Vec<MarketHolder>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HoldersResponse {
    Grouped(Vec<TokenHolders>),
    Flat(Vec<MarketHolder>),
}

// ---------------------------------------------------------------------------
// Client implementation
// ---------------------------------------------------------------------------

impl PolymarketDataClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// GET /v1/leaderboard: top traders by all-time PNL
    pub async fn get_leaderboard(&self, limit: u32) -> ScreenerResult<Vec<LeaderboardEntry>> {
        let url = format!("{}/v1/leaderboard", self.base_url);
        let query = [
            ("category", "OVERALL".to_string()),
            ("timePeriod", "ALL".to_string()),
            ("orderBy", "PNL".to_string()),
            ("limit", limit.to_string()),
        ];
        debug!(limit, "Fetching leaderboard");

        // Served either bare or wrapped as `{ "leaderboard": [...] }`
        let raw: serde_json::Value = get_json(&self.client, "data leaderboard", &url, &query).await?;
        let list = match raw {
            serde_json::Value::Object(mut obj) => obj.remove("leaderboard").unwrap_or_default(),
            other => other,
        };
        let entries: Vec<LeaderboardEntry> = serde_json::from_value(list)?;
        debug!(count = entries.len(), "Leaderboard fetched");
        Ok(entries)
    }

    /// GET /positions?user={address}: open positions, biggest PNL first
    pub async fn get_positions(&self, address: &str) -> ScreenerResult<Vec<TraderPosition>> {
        let url = format!("{}/positions", self.base_url);
        let query = [
            ("user", address.to_string()),
            ("sortBy", "CASHPNL".to_string()),
            ("sortDirection", "DESC".to_string()),
            ("limit", "100".to_string()),
            ("sizeThreshold", "0".to_string()),
        ];
        debug!(address, "Fetching positions");

        let positions: Vec<TraderPosition> =
            get_json(&self.client, "data positions", &url, &query).await?;
        debug!(count = positions.len(), "Positions fetched");
        Ok(positions)
    }

    /// GET /trades?user={address}: trader trade history, newest first
    pub async fn get_trades(&self, address: &str, limit: u32) -> ScreenerResult<Vec<TraderTrade>> {
        let url = format!("{}/trades", self.base_url);
        let query = [
            ("user", address.to_string()),
            ("limit", limit.to_string()),
            ("takerOnly", "false".to_string()),
        ];
        debug!(address, "Fetching trades");

        let trades: Vec<TraderTrade> = get_json(&self.client, "data trades", &url, &query).await?;
        debug!(count = trades.len(), "Trades fetched");
        Ok(trades)
    }

    /// GET /trades?market={condition_id}: recent fills in one market
    pub async fn get_market_trades(
        &self,
        condition_id: &str,
        limit: u32,
    ) -> ScreenerResult<Vec<TraderTrade>> {
        let url = format!("{}/trades", self.base_url);
        let query = [
            ("market", condition_id.to_string()),
            ("limit", limit.to_string()),
            ("takerOnly", "false".to_string()),
        ];
        debug!(condition_id, "Fetching market trades");

        let trades: Vec<TraderTrade> =
            get_json(&self.client, "data market trades", &url, &query).await?;
        Ok(trades)
    }

    /// GET /holders?market={condition_id}&limit=..&minBalance=1
    pub async fn get_holders(
        &self,
        condition_id: &str,
        limit: u32,
    ) -> ScreenerResult<Vec<MarketHolder>> {
        let url = format!("{}/holders", self.base_url);
        let query = [
            ("market", condition_id.to_string()),
            ("limit", limit.to_string()),
            ("minBalance", "1".to_string()),
        ];
        debug!(condition_id, "Fetching holders");

        let raw: serde_json::Value = get_json(&self.client, "data holders", &url, &query).await?;
        let holders = decode_holders(raw)?;
        debug!(count = holders.len(), "Holders fetched");
        Ok(holders)
    }
}

pub(crate) fn decode_holders(raw: serde_json::Value) -> ScreenerResult<Vec<MarketHolder>> {
    if !raw.is_array() {
        warn!("Holders response is not an array");
        return Ok(Vec::new());
    }
    Ok(match serde_json::from_value::<HoldersResponse>(raw)? {
        HoldersResponse::Grouped(groups) => groups.into_iter().flat_map(|g| g.holders).collect(),
        HoldersResponse::Flat(holders) => holders,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_grouped_holders() {
        let raw = json!([
            {
                "token": "111",
                "holders": [
                    { "proxyWallet": "0xaaa", "amount": 1500.5, "outcomeIndex": 0, "name": "alice" }
                ]
            },
            {
                "token": "222",
                "holders": [
                    { "proxyWallet": "0xbbb", "amount": "20", "outcomeIndex": 1 }
                ]
            }
        ]);
        let holders = decode_holders(raw).unwrap();
        assert_eq!(holders.len(), 2);
        assert_eq!(holders[0].address, "0xaaa");
        assert_eq!(holders[0].balance, 1500.5);
        assert_eq!(holders[0].outcome_side(), Outcome::Yes);
        assert_eq!(holders[1].balance, 20.0);
        assert_eq!(holders[1].outcome_side(), Outcome::No);
    }

    #[test]
    fn test_decode_flat_holders() {
        let raw = json!([
            { "address": "0xccc", "balance": 10, "outcome": "YES", "pnl": 3.5 },
            { "address": "0xddd", "balance": 4, "outcome": "No" }
        ]);
        let holders = decode_holders(raw).unwrap();
        assert_eq!(holders.len(), 2);
        assert_eq!(holders[0].outcome_side(), Outcome::Yes);
        assert_eq!(holders[0].pnl, Some(3.5));
        assert_eq!(holders[1].outcome_side(), Outcome::No);
    }

    #[test]
    fn test_decode_holders_non_array() {
        assert!(decode_holders(json!({ "error": "nope" })).unwrap().is_empty());
        assert!(decode_holders(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_trade_helpers() {
        let trade: TraderTrade = serde_json::from_value(json!({
            "side": "sell",
            "size": 200,
            "price": "0.35",
            "timestamp": 1700000000
        }))
        .unwrap();
        assert!(trade.is_sell());
        assert!((trade.notional() - 70.0).abs() < 1e-9);
        assert_eq!(trade.timestamp, Some(1_700_000_000));
    }
}
