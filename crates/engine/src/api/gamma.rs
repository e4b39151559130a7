//! Gamma markets API client: market listings and details

use super::{get_json, segment_url};
use crate::error::ScreenerResult;
use crate::types::Market;
use reqwest::Client;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct GammaClient {
    client: Client,
    base_url: String,
}

impl GammaClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// GET /markets: current markets ordered by 24h volume.
    ///
    /// Entries that fail to decode or lack an id/question are dropped.
    pub async fn get_markets(&self, limit: u32, active: bool) -> ScreenerResult<Vec<Market>> {
        let url = format!("{}/markets", self.base_url);
        let query = [
            ("limit", limit.to_string()),
            ("active", active.to_string()),
            ("closed", "false".to_string()),
            ("order", "volume24hr".to_string()),
            ("ascending", "false".to_string()),
        ];
        debug!(limit, active, "Fetching markets");

        let raw: serde_json::Value = get_json(&self.client, "gamma markets", &url, &query).await?;
        let markets = decode_markets(raw);
        info!(count = markets.len(), "Markets fetched");
        Ok(markets)
    }

    /// GET /markets?slug={slug}
    pub async fn get_market_by_slug(&self, slug: &str) -> ScreenerResult<Option<Market>> {
        let url = format!("{}/markets", self.base_url);
        let raw: serde_json::Value =
            get_json(&self.client, "gamma market by slug", &url, &[("slug", slug.to_string())])
                .await?;
        Ok(decode_markets(raw).into_iter().next())
    }

    /// GET /markets/{id}; the id is sent as a single escaped path segment
    pub async fn get_market_by_id(&self, id: &str) -> ScreenerResult<Option<Market>> {
        if matches!(id.trim(), "" | "." | "..") {
            return Ok(None);
        }
        let url = segment_url(&self.base_url, &["markets", id])?;
        let raw: serde_json::Value =
            get_json(&self.client, "gamma market by id", url.as_str(), &[]).await?;
        Ok(serde_json::from_value::<Market>(raw)
            .ok()
            .filter(|m| m.is_listable()))
    }

    /// Resolve a route identifier: try it as a slug first, then as a market ID
    pub async fn find_market(&self, slug_or_id: &str) -> ScreenerResult<Option<Market>> {
        match self.get_market_by_slug(slug_or_id).await {
            Ok(Some(market)) => {
                debug!(question = %market.question, "Found market by slug");
                return Ok(Some(market));
            }
            Ok(None) => {}
            Err(e) => warn!(slug = slug_or_id, error = %e, "Slug lookup failed"),
        }

        let market = self.get_market_by_id(slug_or_id).await?;
        if let Some(m) = &market {
            debug!(question = %m.question, "Found market by ID");
        }
        Ok(market)
    }
}

/// Keep only well-formed market objects from a raw listing
pub(crate) fn decode_markets(raw: serde_json::Value) -> Vec<Market> {
    let serde_json::Value::Array(items) = raw else {
        warn!("Markets response is not an array");
        return Vec::new();
    };
    let total = items.len();
    let markets: Vec<Market> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Market>(item).ok())
        .filter(|m| m.is_listable())
        .collect();
    if markets.len() < total {
        debug!(dropped = total - markets.len(), "Dropped malformed markets");
    }
    markets
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_markets_filters_invalid() {
        let raw = json!([
            { "id": "1", "question": "Will it happen?" },
            { "id": "2" },
            null,
            "garbage",
            { "id": 3, "question": "Numeric id?", "volume": "12.5" }
        ]);
        let markets = decode_markets(raw);
        assert_eq!(markets.len(), 2);
        assert_eq!(markets[1].id, "3");
        assert_eq!(markets[1].volume, Some(12.5));
    }

    #[test]
    fn test_decode_markets_keeps_null_fields() {
        let raw = json!([
            { "id": "1", "question": "Will it happen?", "active": null },
            { "id": "2", "question": "Other?", "slug": null, "closed": null }
        ]);
        let markets = decode_markets(raw);
        assert_eq!(markets.len(), 2);
        assert!(!markets[0].active);
        assert_eq!(markets[1].slug, "");
    }

    #[test]
    fn test_decode_markets_non_array() {
        assert!(decode_markets(json!({ "error": "bad" })).is_empty());
    }
}
