//! Goldsky-hosted Polymarket subgraphs (GraphQL over POST)
//!
//! BigInt / BigDecimal fields come back as strings and are kept that way.

use super::check_status;
use crate::config::SubgraphEndpoints;
use crate::error::{ScreenerError, ScreenerResult};
use crate::types::de_or_default;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

const POSITIONS_QUERY: &str = r#"
query GetPositions($first: Int!) {
  positions(first: $first, orderBy: shares, orderDirection: desc) {
    id
    user
    market
    outcome
    shares
    avgPrice
    timestamp
  }
}"#;

const ACTIVITY_QUERY: &str = r#"
query GetActivity($first: Int!) {
  activities(first: $first, orderBy: timestamp, orderDirection: desc) {
    id
    user
    market
    type
    amount
    price
    timestamp
  }
}"#;

const PNL_QUERY: &str = r#"
query GetPnlLeaderboard($first: Int!) {
  users(first: $first, orderBy: totalPnl, orderDirection: desc) {
    id
    totalPnl
    realizedPnl
    unrealizedPnl
  }
}"#;

const ORDERS_QUERY: &str = r#"
query GetOrderFills($first: Int!) {
  orderFilledEvents(first: $first, orderBy: timestamp, orderDirection: desc) {
    id
    timestamp
    maker
    taker
    makerAssetId
    takerAssetId
    makerAmountFilled
    takerAmountFilled
    fee
  }
}"#;

const OPEN_INTEREST_QUERY: &str = r#"
query GetOpenInterest($first: Int!) {
  marketOpenInterests(first: $first, orderBy: amount, orderDirection: desc) {
    id
    amount
  }
}"#;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgraphPosition {
    pub id: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub user: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub market: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub outcome: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub shares: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub avg_price: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub user: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub market: String,
    #[serde(rename = "type", default, deserialize_with = "de_or_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub amount: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub price: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub timestamp: String,
}

/// PNL subgraph `users` entity, keyed by wallet address
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PnlUser {
    id: String,
    #[serde(default, deserialize_with = "de_or_default")]
    total_pnl: String,
    #[serde(default, deserialize_with = "de_or_default")]
    realized_pnl: String,
    #[serde(default, deserialize_with = "de_or_default")]
    unrealized_pnl: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlData {
    pub user: String,
    pub total_pnl: String,
    pub realized_pnl: String,
    pub unrealized_pnl: String,
}

impl From<PnlUser> for PnlData {
    fn from(u: PnlUser) -> Self {
        Self {
            user: u.id,
            total_pnl: u.total_pnl,
            realized_pnl: u.realized_pnl,
            unrealized_pnl: u.unrealized_pnl,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFill {
    pub id: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub maker: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub taker: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub maker_asset_id: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub taker_asset_id: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub maker_amount_filled: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub taker_amount_filled: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub fee: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketOpenInterest {
    pub id: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub amount: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PositionsData {
    #[serde(default, deserialize_with = "de_or_default")]
    positions: Vec<SubgraphPosition>,
}

#[derive(Debug, Deserialize)]
struct ActivitiesData {
    #[serde(default, deserialize_with = "de_or_default")]
    activities: Vec<Activity>,
}

#[derive(Debug, Deserialize)]
struct UsersData {
    #[serde(default, deserialize_with = "de_or_default")]
    users: Vec<PnlUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderFillsData {
    #[serde(default, deserialize_with = "de_or_default")]
    order_filled_events: Vec<OrderFill>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenInterestData {
    #[serde(default, deserialize_with = "de_or_default")]
    market_open_interests: Vec<MarketOpenInterest>,
}

#[derive(Clone)]
pub struct SubgraphClient {
    client: Client,
    endpoints: SubgraphEndpoints,
}

impl SubgraphClient {
    pub fn new(client: Client, endpoints: SubgraphEndpoints) -> Self {
        Self { client, endpoints }
    }

    async fn query<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &str,
        first: u32,
    ) -> ScreenerResult<T> {
        let body = json!({ "query": query, "variables": { "first": first } });
        debug!(endpoint, first, "Querying subgraph");
        let resp = self.client.post(url).json(&body).send().await?;
        let resp = check_status(endpoint, resp).await?;
        let raw: serde_json::Value = resp.json().await?;
        unwrap_graphql(raw)
    }

    pub async fn fetch_positions(&self, first: u32) -> ScreenerResult<Vec<SubgraphPosition>> {
        let data: PositionsData = self
            .query("positions subgraph", &self.endpoints.positions, POSITIONS_QUERY, first)
            .await?;
        Ok(data.positions)
    }

    pub async fn fetch_activity(&self, first: u32) -> ScreenerResult<Vec<Activity>> {
        let data: ActivitiesData = self
            .query("activity subgraph", &self.endpoints.activity, ACTIVITY_QUERY, first)
            .await?;
        Ok(data.activities)
    }

    /// Top wallets by total PNL
    pub async fn fetch_pnl_leaderboard(&self, first: u32) -> ScreenerResult<Vec<PnlData>> {
        let data: UsersData = self
            .query("pnl subgraph", &self.endpoints.pnl, PNL_QUERY, first)
            .await?;
        Ok(data.users.into_iter().map(PnlData::from).collect())
    }

    pub async fn fetch_order_fills(&self, first: u32) -> ScreenerResult<Vec<OrderFill>> {
        let data: OrderFillsData = self
            .query("orders subgraph", &self.endpoints.orders, ORDERS_QUERY, first)
            .await?;
        Ok(data.order_filled_events)
    }

    pub async fn fetch_open_interest(&self, first: u32) -> ScreenerResult<Vec<MarketOpenInterest>> {
        let data: OpenInterestData = self
            .query(
                "open interest subgraph",
                &self.endpoints.open_interest,
                OPEN_INTEREST_QUERY,
                first,
            )
            .await?;
        Ok(data.market_open_interests)
    }
}

/// Split a GraphQL envelope into its data, surfacing `errors` as [`ScreenerError::GraphQl`]
fn unwrap_graphql<T: DeserializeOwned>(raw: serde_json::Value) -> ScreenerResult<T> {
    let envelope: GraphQlResponse<T> = serde_json::from_value(raw)?;
    if let Some(errors) = envelope.errors.filter(|e| !e.is_null()) {
        return Err(ScreenerError::GraphQl(errors.to_string()));
    }
    envelope
        .data
        .ok_or_else(|| ScreenerError::GraphQl("response carried no data".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_positions() {
        let raw = json!({
            "data": {
                "positions": [{
                    "id": "p1",
                    "user": "0xabc",
                    "market": "m1",
                    "outcome": "0",
                    "shares": "1000000000",
                    "avgPrice": "0.42",
                    "timestamp": "1700000000"
                }]
            }
        });
        let data: PositionsData = unwrap_graphql(raw).unwrap();
        assert_eq!(data.positions.len(), 1);
        assert_eq!(data.positions[0].avg_price, "0.42");
    }

    #[test]
    fn test_nullable_fields_decode_as_empty() {
        let raw = json!({
            "data": {
                "positions": [{ "id": "p1", "user": "0xabc", "market": null, "avgPrice": null }]
            }
        });
        let data: PositionsData = unwrap_graphql(raw).unwrap();
        assert_eq!(data.positions[0].market, "");
        assert_eq!(data.positions[0].avg_price, "");

        let data: ActivitiesData = unwrap_graphql(json!({ "data": { "activities": null } })).unwrap();
        assert!(data.activities.is_empty());
    }

    #[test]
    fn test_pnl_users_are_reshaped() {
        let raw = json!({
            "data": {
                "users": [{ "id": "0xabc", "totalPnl": "12.5", "realizedPnl": "10", "unrealizedPnl": "2.5" }]
            }
        });
        let data: UsersData = unwrap_graphql(raw).unwrap();
        let pnl: Vec<PnlData> = data.users.into_iter().map(PnlData::from).collect();
        assert_eq!(pnl[0].user, "0xabc");
        assert_eq!(pnl[0].total_pnl, "12.5");
    }

    #[test]
    fn test_graphql_errors_surface() {
        let raw = json!({ "data": null, "errors": [{ "message": "bad field" }] });
        let err = unwrap_graphql::<UsersData>(raw).unwrap_err();
        assert!(matches!(err, ScreenerError::GraphQl(msg) if msg.contains("bad field")));
    }

    #[test]
    fn test_missing_data_is_an_error() {
        let err = unwrap_graphql::<UsersData>(json!({})).unwrap_err();
        assert!(matches!(err, ScreenerError::GraphQl(_)));
    }

    #[test]
    fn test_activity_type_field() {
        let raw = json!({
            "data": { "activities": [{ "id": "a1", "type": "Split", "amount": "5" }] }
        });
        let data: ActivitiesData = unwrap_graphql(raw).unwrap();
        assert_eq!(data.activities[0].kind, "Split");
        assert_eq!(data.activities[0].price, "");
    }
}
