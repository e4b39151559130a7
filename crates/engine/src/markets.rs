//! Market list view: sector filters, search, yes-price parsing and summary

use crate::attribution::smart_wallet_count;
use crate::category::{match_category, Category};
use crate::types::{json_list, Market};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Markets requested from Gamma for the list view
pub const MARKET_FETCH_LIMIT: u32 = 500;
/// Rows shown after filtering
pub const MAX_LISTED: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    #[default]
    Trending,
    New,
    Politics,
    Crypto,
    Sports,
    Smart,
}

impl Sector {
    pub const ALL: [Sector; 6] = [
        Self::Trending,
        Self::New,
        Self::Politics,
        Self::Crypto,
        Self::Sports,
        Self::Smart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::New => "new",
            Self::Politics => "politics",
            Self::Crypto => "crypto",
            Self::Sports => "sports",
            Self::Smart => "smart",
        }
    }

    fn category(&self) -> Option<Category> {
        match self {
            Self::Politics => Some(Category::Politics),
            Self::Crypto => Some(Category::Crypto),
            Self::Sports => Some(Category::Sports),
            _ => None,
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sector| sector.as_str() == s)
            .ok_or_else(|| format!("unknown sector: {s}"))
    }
}

/// A market row with its derived columns
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedMarket {
    #[serde(flatten)]
    pub market: Market,
    pub smart_count: u32,
    pub category_tag: Category,
    pub yes_price: f64,
}

impl ListedMarket {
    pub fn from_market(market: Market) -> Self {
        let smart_count = smart_wallet_count(market.attribution_id());
        let category_tag = match_category(&market);
        let yes_price = yes_price(market.outcome_prices.as_ref());
        Self {
            market,
            smart_count,
            category_tag,
            yes_price,
        }
    }

    pub fn no_price(&self) -> f64 {
        no_price(self.yes_price)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub total_markets: usize,
    pub total_volume: f64,
    pub smart_markets: usize,
}

/// YES probability as a percentage in [0, 100]; 50 when the field cannot be read.
///
/// `outcomePrices` arrives as a bare number, an array, or a string holding a JSON array.
pub fn yes_price(outcome_prices: Option<&serde_json::Value>) -> f64 {
    let first = match outcome_prices {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(v) => json_list(v).first().and_then(value_as_f64),
        None => None,
    };
    match first {
        Some(p) if p.is_finite() => (p * 100.0).clamp(0.0, 100.0),
        _ => 50.0,
    }
}

pub fn no_price(yes: f64) -> f64 {
    100.0 - yes
}

fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn end_timestamp(market: &Market) -> Option<i64> {
    let raw = market.end_date.as_deref()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Derive list rows for every market
pub fn list_markets(markets: Vec<Market>) -> Vec<ListedMarket> {
    markets.into_iter().map(ListedMarket::from_market).collect()
}

/// Apply search, then the sector filter or ordering, then cap at [`MAX_LISTED`]
pub fn filter_markets(rows: &[ListedMarket], sector: Sector, search: &str) -> Vec<ListedMarket> {
    let query = search.trim().to_lowercase();
    let mut result: Vec<ListedMarket> = rows
        .iter()
        .filter(|r| query.is_empty() || r.market.question.to_lowercase().contains(&query))
        .cloned()
        .collect();

    match sector {
        Sector::Smart => {
            result.retain(|r| r.smart_count > 0);
            result.sort_by_key(|r| Reverse(r.smart_count));
        }
        Sector::Trending => {
            result.sort_by(|a, b| {
                let va = a.market.volume24hr.unwrap_or(0.0);
                let vb = b.market.volume24hr.unwrap_or(0.0);
                vb.total_cmp(&va)
            });
        }
        // Latest end date first, undated markets last
        Sector::New => result.sort_by_key(|r| Reverse(end_timestamp(&r.market))),
        Sector::Politics | Sector::Crypto | Sector::Sports => {
            let wanted = sector.category();
            result.retain(|r| Some(r.category_tag) == wanted);
        }
    }

    result.truncate(MAX_LISTED);
    result
}

/// Totals over the full (unfiltered) listing
pub fn summarize(rows: &[ListedMarket]) -> MarketSummary {
    MarketSummary {
        total_markets: rows.len(),
        total_volume: rows.iter().filter_map(|r| r.market.volume).sum(),
        smart_markets: rows.iter().filter(|r| r.smart_count > 0).count(),
    }
}
