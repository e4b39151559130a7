//! Screener service: composes upstream fetches into the dashboard views
//!
//! Every upstream call goes through [`MarketSource`]. Failures are logged
//! here and degrade to an empty list, `None` or a zeroed value, so one bad
//! sub-fetch never blocks the rest of a view.

use crate::api::binance::{TickerQuote, TickerStats, TICKER_SYMBOLS};
use crate::api::clob::{HistoryInterval, OrderBookSnapshot, PricePoint};
use crate::api::polymarket::{LeaderboardEntry, MarketHolder, TraderPosition, TraderTrade};
use crate::api::subgraph::{Activity, MarketOpenInterest, OrderFill, PnlData, SubgraphPosition};
use crate::api::{
    build_http_client, BinanceClient, ClobClient, GammaClient, PolymarketDataClient, SubgraphClient,
};
use crate::attribution::{attribute_smart_wallets, Attribution};
use crate::category::{match_category, Category};
use crate::charts::{chart_bundle, ChartBundle};
use crate::config::ScreenerConfig;
use crate::error::ScreenerResult;
use crate::leaderboard::{
    annotate_live_leaderboard, derive_leaderboard_random, filter_leaderboard, podium, total_pnl,
    LeaderboardRow, LiveLeaderboardRow,
};
use crate::markets::{
    filter_markets, list_markets, no_price, summarize, yes_price, ListedMarket, MarketSummary,
    Sector, MARKET_FETCH_LIMIT, MAX_LISTED,
};
use crate::orderbook::{build_order_book, OrderBookView};
use crate::trader::{compute_trader_stats, to_market_trades, MarketTrade, TraderStats, TRADER_TRADE_LIMIT};
use crate::types::Market;
use crate::wallets::{find_smart_wallet, SMART_WALLETS};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Holders requested per market
pub const HOLDER_LIMIT: u32 = 50;
/// Fills shown on the market page
pub const RECENT_TRADE_LIMIT: u32 = 20;
/// Live leaderboard rows requested from the Data API
pub const LIVE_LEADERBOARD_LIMIT: u32 = 50;

// ---------------------------------------------------------------------------
// Upstream seam
// ---------------------------------------------------------------------------

/// Everything the screener reads from the outside world
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn markets(&self, limit: u32) -> ScreenerResult<Vec<Market>>;
    async fn find_market(&self, slug_or_id: &str) -> ScreenerResult<Option<Market>>;
    async fn holders(&self, condition_id: &str, limit: u32) -> ScreenerResult<Vec<MarketHolder>>;
    async fn order_book(&self, token_id: &str) -> ScreenerResult<OrderBookSnapshot>;
    async fn price_history(&self, token_id: &str) -> ScreenerResult<Vec<PricePoint>>;
    async fn market_trades(&self, condition_id: &str, limit: u32) -> ScreenerResult<Vec<TraderTrade>>;
    async fn positions(&self, address: &str) -> ScreenerResult<Vec<TraderPosition>>;
    async fn trades(&self, address: &str, limit: u32) -> ScreenerResult<Vec<TraderTrade>>;
    async fn leaderboard(&self, limit: u32) -> ScreenerResult<Vec<LeaderboardEntry>>;

    async fn ticker(&self, symbol: &str) -> ScreenerResult<TickerStats>;
    async fn subgraph_positions(&self, first: u32) -> ScreenerResult<Vec<SubgraphPosition>>;
    async fn subgraph_activity(&self, first: u32) -> ScreenerResult<Vec<Activity>>;
    async fn subgraph_pnl(&self, first: u32) -> ScreenerResult<Vec<PnlData>>;
    async fn subgraph_order_fills(&self, first: u32) -> ScreenerResult<Vec<OrderFill>>;
    async fn subgraph_open_interest(&self, first: u32) -> ScreenerResult<Vec<MarketOpenInterest>>;
}

/// [`MarketSource`] backed by the public HTTP APIs
#[derive(Clone)]
pub struct HttpMarketSource {
    gamma: GammaClient,
    clob: ClobClient,
    data: PolymarketDataClient,
    binance: BinanceClient,
    subgraph: SubgraphClient,
}

impl HttpMarketSource {
    pub fn new(config: &ScreenerConfig) -> ScreenerResult<Self> {
        let client = build_http_client(config.http_timeout())?;
        Ok(Self {
            gamma: GammaClient::new(client.clone(), &config.gamma_url),
            clob: ClobClient::new(client.clone(), &config.clob_url),
            data: PolymarketDataClient::new(client.clone(), &config.data_url),
            binance: BinanceClient::new(client.clone(), &config.binance_url),
            subgraph: SubgraphClient::new(client, config.subgraphs.clone()),
        })
    }
}

#[async_trait]
impl MarketSource for HttpMarketSource {
    async fn markets(&self, limit: u32) -> ScreenerResult<Vec<Market>> {
        self.gamma.get_markets(limit, true).await
    }

    async fn find_market(&self, slug_or_id: &str) -> ScreenerResult<Option<Market>> {
        self.gamma.find_market(slug_or_id).await
    }

    async fn holders(&self, condition_id: &str, limit: u32) -> ScreenerResult<Vec<MarketHolder>> {
        self.data.get_holders(condition_id, limit).await
    }

    async fn order_book(&self, token_id: &str) -> ScreenerResult<OrderBookSnapshot> {
        self.clob.get_order_book(token_id).await
    }

    async fn price_history(&self, token_id: &str) -> ScreenerResult<Vec<PricePoint>> {
        self.clob.get_price_history(token_id, HistoryInterval::Max).await
    }

    async fn market_trades(&self, condition_id: &str, limit: u32) -> ScreenerResult<Vec<TraderTrade>> {
        self.data.get_market_trades(condition_id, limit).await
    }

    async fn positions(&self, address: &str) -> ScreenerResult<Vec<TraderPosition>> {
        self.data.get_positions(address).await
    }

    async fn trades(&self, address: &str, limit: u32) -> ScreenerResult<Vec<TraderTrade>> {
        self.data.get_trades(address, limit).await
    }

    async fn leaderboard(&self, limit: u32) -> ScreenerResult<Vec<LeaderboardEntry>> {
        self.data.get_leaderboard(limit).await
    }

    async fn ticker(&self, symbol: &str) -> ScreenerResult<TickerStats> {
        self.binance.get_24h_stats(symbol).await
    }

    async fn subgraph_positions(&self, first: u32) -> ScreenerResult<Vec<SubgraphPosition>> {
        self.subgraph.fetch_positions(first).await
    }

    async fn subgraph_activity(&self, first: u32) -> ScreenerResult<Vec<Activity>> {
        self.subgraph.fetch_activity(first).await
    }

    async fn subgraph_pnl(&self, first: u32) -> ScreenerResult<Vec<PnlData>> {
        self.subgraph.fetch_pnl_leaderboard(first).await
    }

    async fn subgraph_order_fills(&self, first: u32) -> ScreenerResult<Vec<OrderFill>> {
        self.subgraph.fetch_order_fills(first).await
    }

    async fn subgraph_open_interest(&self, first: u32) -> ScreenerResult<Vec<MarketOpenInterest>> {
        self.subgraph.fetch_open_interest(first).await
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketListing {
    pub sector: Sector,
    pub markets: Vec<ListedMarket>,
    pub summary: MarketSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDetail {
    pub market: Market,
    pub yes_price: f64,
    pub no_price: f64,
    pub category: Category,
    pub smart_wallets: Attribution,
    /// `None` when no wallet is pinned
    pub pinned_wallet_held: Option<bool>,
    pub order_book: Option<OrderBookView>,
    pub chart: Option<ChartBundle>,
    pub recent_trades: Vec<MarketTrade>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardView {
    pub rows: Vec<LeaderboardRow>,
    pub podium: Vec<LeaderboardRow>,
    /// Over every tracked wallet, not just the filtered rows
    pub total_pnl: f64,
    pub tracked_wallets: usize,
}

/// Read-side facade used by the HTTP server and the CLI
pub struct Screener<S: MarketSource> {
    source: S,
}

impl Screener<HttpMarketSource> {
    pub fn from_config(config: &ScreenerConfig) -> ScreenerResult<Self> {
        Ok(Self::new(HttpMarketSource::new(config)?))
    }
}

impl<S: MarketSource> Screener<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Market list for one sector, with the summary over the whole fetch
    pub async fn markets(&self, sector: Sector, search: &str, limit: usize) -> MarketListing {
        let fetched = match self.source.markets(MARKET_FETCH_LIMIT).await {
            Ok(markets) => markets,
            Err(e) => {
                error!(error = %e, "Failed to load markets");
                Vec::new()
            }
        };

        let rows = list_markets(fetched);
        let summary = summarize(&rows);
        let mut markets = filter_markets(&rows, sector, search);
        markets.truncate(limit.clamp(1, MAX_LISTED));
        info!(
            sector = %sector,
            shown = markets.len(),
            total = summary.total_markets,
            "Market list built"
        );

        MarketListing {
            sector,
            markets,
            summary,
        }
    }

    /// Everything the market page shows; `None` when the market cannot be found
    pub async fn market_detail(&self, slug_or_id: &str, pinned_wallet: Option<&str>) -> Option<MarketDetail> {
        let market = match self.source.find_market(slug_or_id).await {
            Ok(Some(market)) => market,
            Ok(None) => {
                warn!(id = slug_or_id, "Market not found");
                return None;
            }
            Err(e) => {
                error!(id = slug_or_id, error = %e, "Failed to load market");
                return None;
            }
        };

        let condition_id = market.attribution_id().to_string();
        let token_id = market.yes_token_id();

        let (holders, book, history, trades) = tokio::join!(
            self.source.holders(&condition_id, HOLDER_LIMIT),
            async {
                match &token_id {
                    Some(token) => self.source.order_book(token).await.map(Some),
                    None => Ok(None),
                }
            },
            async {
                match &token_id {
                    Some(token) => self.source.price_history(token).await,
                    None => Ok(Vec::new()),
                }
            },
            self.source.market_trades(&condition_id, RECENT_TRADE_LIMIT),
        );

        let holders = holders.unwrap_or_else(|e| {
            warn!(condition_id, error = %e, "Failed to fetch holders");
            Vec::new()
        });
        let order_book = match book {
            Ok(snapshot) => snapshot.map(|s| build_order_book(&s)),
            Err(e) => {
                warn!(error = %e, "Failed to fetch order book");
                None
            }
        };
        let history = history.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to fetch price history");
            Vec::new()
        });
        let trades = trades.unwrap_or_else(|e| {
            warn!(condition_id, error = %e, "Failed to fetch market trades");
            Vec::new()
        });

        let smart_wallets = attribute_smart_wallets(&condition_id, &holders);
        debug!(
            count = smart_wallets.len(),
            simulated = smart_wallets.is_simulated(),
            "Smart wallets attributed"
        );

        let yes = yes_price(market.outcome_prices.as_ref());
        let chart = {
            let now = chrono::Utc::now().timestamp();
            match chart_bundle(&history, yes / 100.0, &mut rand::thread_rng(), now) {
                Ok(bundle) => Some(bundle),
                Err(e) => {
                    warn!(error = %e, "Failed to build charts");
                    None
                }
            }
        };

        Some(MarketDetail {
            yes_price: yes,
            no_price: no_price(yes),
            category: match_category(&market),
            pinned_wallet_held: pinned_wallet.map(|w| smart_wallets.contains_wallet(w)),
            smart_wallets,
            order_book,
            chart,
            recent_trades: to_market_trades(&trades),
            market,
        })
    }

    pub async fn order_book(&self, token_id: &str) -> OrderBookView {
        match self.source.order_book(token_id).await {
            Ok(snapshot) => build_order_book(&snapshot),
            Err(e) => {
                warn!(token_id, error = %e, "Failed to fetch order book");
                OrderBookView::default()
            }
        }
    }

    /// Hover-card stats; zeroed when the wallet's data cannot be loaded
    pub async fn trader_stats(&self, address: &str) -> TraderStats {
        let (positions, trades) = tokio::join!(
            self.source.positions(address),
            self.source.trades(address, TRADER_TRADE_LIMIT),
        );

        let tracked = find_smart_wallet(address).map(|w| w.username);
        let (positions, trades) = match (positions, trades) {
            (Ok(p), Ok(t)) => (p, t),
            (Err(e), _) | (_, Err(e)) => {
                warn!(address, error = %e, "Failed to load trader data");
                return TraderStats::empty(address, tracked);
            }
        };

        let username = tracked.map(str::to_string).or_else(|| {
            trades
                .iter()
                .find_map(|t| t.name.clone().filter(|n| !n.trim().is_empty()))
        });
        compute_trader_stats(address, username.as_deref(), &positions, &trades)
    }

    /// Derived leaderboard of tracked wallets
    pub fn leaderboard(&self, search: &str) -> LeaderboardView {
        let all = derive_leaderboard_random(&SMART_WALLETS);
        let rows = filter_leaderboard(&all, search);
        LeaderboardView {
            podium: podium(&rows).to_vec(),
            total_pnl: total_pnl(&all),
            tracked_wallets: all.len(),
            rows,
        }
    }

    pub async fn live_leaderboard(&self) -> Vec<LiveLeaderboardRow> {
        match self.source.leaderboard(LIVE_LEADERBOARD_LIMIT).await {
            Ok(entries) => annotate_live_leaderboard(entries),
            Err(e) => {
                warn!(error = %e, "Failed to fetch live leaderboard");
                Vec::new()
            }
        }
    }

    /// Status-bar quotes; symbols that fail are left out
    pub async fn ticker(&self) -> Vec<TickerQuote> {
        let [a, b, c] = TICKER_SYMBOLS;
        let (ra, rb, rc) = tokio::join!(self.source.ticker(a), self.source.ticker(b), self.source.ticker(c));
        [(a, ra), (b, rb), (c, rc)]
            .into_iter()
            .filter_map(|(symbol, res)| match res {
                Ok(stats) => Some(TickerQuote::from(&stats)),
                Err(e) => {
                    warn!(symbol, error = %e, "Failed to fetch ticker");
                    None
                }
            })
            .collect()
    }

    pub async fn subgraph_positions(&self, first: u32) -> Vec<SubgraphPosition> {
        self.source
            .subgraph_positions(first)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to fetch subgraph positions");
                Vec::new()
            })
    }

    pub async fn subgraph_activity(&self, first: u32) -> Vec<Activity> {
        self.source.subgraph_activity(first).await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to fetch subgraph activity");
            Vec::new()
        })
    }

    pub async fn subgraph_pnl(&self, first: u32) -> Vec<PnlData> {
        self.source.subgraph_pnl(first).await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to fetch PNL leaderboard");
            Vec::new()
        })
    }

    pub async fn subgraph_order_fills(&self, first: u32) -> Vec<OrderFill> {
        self.source
            .subgraph_order_fills(first)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to fetch order fills");
                Vec::new()
            })
    }

    pub async fn subgraph_open_interest(&self, first: u32) -> Vec<MarketOpenInterest> {
        self.source
            .subgraph_open_interest(first)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to fetch open interest");
                Vec::new()
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::clob::RawLevel;
    use crate::error::ScreenerError;
    use serde_json::json;

    fn upstream_down() -> ScreenerError {
        ScreenerError::Status {
            endpoint: "test",
            status: 500,
            body: "boom".into(),
        }
    }

    /// In-memory source; `None` fields fail with a 500
    #[derive(Default)]
    struct FakeSource {
        markets: Option<Vec<Market>>,
        holders: Option<Vec<MarketHolder>>,
        book: Option<OrderBookSnapshot>,
        history: Option<Vec<PricePoint>>,
        trades: Option<Vec<TraderTrade>>,
        positions: Option<Vec<TraderPosition>>,
        leaderboard: Option<Vec<LeaderboardEntry>>,
        tickers: Vec<TickerStats>,
    }

    fn or_fail<T: Clone>(value: &Option<T>) -> ScreenerResult<T> {
        value.clone().ok_or_else(upstream_down)
    }

    #[async_trait]
    impl MarketSource for FakeSource {
        async fn markets(&self, _limit: u32) -> ScreenerResult<Vec<Market>> {
            or_fail(&self.markets)
        }

        async fn find_market(&self, slug_or_id: &str) -> ScreenerResult<Option<Market>> {
            Ok(or_fail(&self.markets)?
                .into_iter()
                .find(|m| m.slug == slug_or_id || m.id == slug_or_id))
        }

        async fn holders(&self, _condition_id: &str, _limit: u32) -> ScreenerResult<Vec<MarketHolder>> {
            or_fail(&self.holders)
        }

        async fn order_book(&self, _token_id: &str) -> ScreenerResult<OrderBookSnapshot> {
            or_fail(&self.book)
        }

        async fn price_history(&self, _token_id: &str) -> ScreenerResult<Vec<PricePoint>> {
            or_fail(&self.history)
        }

        async fn market_trades(&self, _condition_id: &str, _limit: u32) -> ScreenerResult<Vec<TraderTrade>> {
            or_fail(&self.trades)
        }

        async fn positions(&self, _address: &str) -> ScreenerResult<Vec<TraderPosition>> {
            or_fail(&self.positions)
        }

        async fn trades(&self, _address: &str, _limit: u32) -> ScreenerResult<Vec<TraderTrade>> {
            or_fail(&self.trades)
        }

        async fn leaderboard(&self, _limit: u32) -> ScreenerResult<Vec<LeaderboardEntry>> {
            or_fail(&self.leaderboard)
        }

        async fn ticker(&self, symbol: &str) -> ScreenerResult<TickerStats> {
            self.tickers
                .iter()
                .find(|t| t.symbol == symbol)
                .cloned()
                .ok_or_else(upstream_down)
        }

        async fn subgraph_positions(&self, _first: u32) -> ScreenerResult<Vec<SubgraphPosition>> {
            Ok(Vec::new())
        }

        async fn subgraph_activity(&self, _first: u32) -> ScreenerResult<Vec<Activity>> {
            Ok(Vec::new())
        }

        async fn subgraph_pnl(&self, _first: u32) -> ScreenerResult<Vec<PnlData>> {
            Ok(Vec::new())
        }

        async fn subgraph_order_fills(&self, _first: u32) -> ScreenerResult<Vec<OrderFill>> {
            Ok(Vec::new())
        }

        async fn subgraph_open_interest(&self, _first: u32) -> ScreenerResult<Vec<MarketOpenInterest>> {
            Ok(Vec::new())
        }
    }

    fn market() -> Market {
        serde_json::from_value(json!({
            "id": "123",
            "question": "Will Bitcoin close above $100k?",
            "slug": "btc-100k",
            "conditionId": "abh",
            "outcomePrices": "[\"0.73\", \"0.27\"]",
            "clobTokenIds": "[\"111\", \"222\"]",
            "volume": "5000"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_markets_degrade_to_empty() {
        let screener = Screener::new(FakeSource::default());
        let listing = screener.markets(Sector::Trending, "", 50).await;
        assert!(listing.markets.is_empty());
        assert_eq!(listing.summary, MarketSummary::default());
    }

    #[tokio::test]
    async fn test_markets_listing() {
        let screener = Screener::new(FakeSource {
            markets: Some(vec![market()]),
            ..Default::default()
        });
        let listing = screener.markets(Sector::Crypto, "bitcoin", 50).await;
        assert_eq!(listing.markets.len(), 1);
        assert_eq!(listing.markets[0].yes_price, 73.0);
        assert_eq!(listing.summary.total_volume, 5000.0);
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let screener = Screener::new(FakeSource {
            markets: Some(vec![]),
            ..Default::default()
        });
        assert!(screener.market_detail("nope", None).await.is_none());

        let broken = Screener::new(FakeSource::default());
        assert!(broken.market_detail("btc-100k", None).await.is_none());
    }

    #[tokio::test]
    async fn test_detail_survives_failed_sub_fetches() {
        let screener = Screener::new(FakeSource {
            markets: Some(vec![market()]),
            ..Default::default()
        });
        let detail = screener.market_detail("btc-100k", None).await.unwrap();

        assert_eq!(detail.yes_price, 73.0);
        assert_eq!(detail.no_price, 27.0);
        assert_eq!(detail.category, Category::Crypto);
        assert!(detail.order_book.is_none());
        assert!(detail.recent_trades.is_empty());
        assert_eq!(detail.pinned_wallet_held, None);
        // no holders: placeholder attribution for "abh" has five wallets
        assert!(detail.smart_wallets.is_simulated());
        assert_eq!(detail.smart_wallets.len(), 5);

        let chart = detail.chart.unwrap();
        assert!(!chart.is_live());
        assert_eq!(chart.candles.last().unwrap().close, 0.73);
    }

    #[tokio::test]
    async fn test_detail_with_live_data() {
        let tracked = SMART_WALLETS[0].address;
        let screener = Screener::new(FakeSource {
            markets: Some(vec![market()]),
            holders: Some(vec![MarketHolder {
                address: tracked.to_string(),
                balance: 1200.0,
                outcome_index: Some(0),
                ..Default::default()
            }]),
            book: Some(OrderBookSnapshot {
                bids: vec![RawLevel::new("0.72", "100")],
                asks: vec![RawLevel::new("0.74", "50")],
                ..Default::default()
            }),
            history: Some(vec![PricePoint { t: Some(0), p: 0.7 }]),
            trades: Some(vec![]),
            ..Default::default()
        });

        let detail = screener.market_detail("123", Some(tracked)).await.unwrap();
        assert!(!detail.smart_wallets.is_simulated());
        assert_eq!(detail.smart_wallets.len(), 1);
        assert_eq!(detail.pinned_wallet_held, Some(true));
        assert_eq!(detail.order_book.unwrap().asks.len(), 1);
        assert!(detail.chart.unwrap().is_live());
    }

    #[tokio::test]
    async fn test_trader_stats_degrade() {
        let screener = Screener::new(FakeSource::default());
        let stats = screener.trader_stats(SMART_WALLETS[0].address).await;
        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.display_name, SMART_WALLETS[0].username);
    }

    #[tokio::test]
    async fn test_trader_stats_use_trade_name() {
        let screener = Screener::new(FakeSource {
            positions: Some(vec![]),
            trades: Some(vec![TraderTrade {
                name: Some("anon-whale".into()),
                side: Some("BUY".into()),
                size: Some(10.0),
                price: Some(0.5),
                ..Default::default()
            }]),
            ..Default::default()
        });
        let stats = screener
            .trader_stats("0x0000000000000000000000000000000000000042")
            .await;
        assert_eq!(stats.display_name, "anon-whale");
        assert_eq!(stats.recent_flows, vec![-5.0]);
    }

    #[tokio::test]
    async fn test_leaderboard_views() {
        let screener = Screener::new(FakeSource::default());
        let view = screener.leaderboard("");
        assert_eq!(view.rows.len(), SMART_WALLETS.len());
        assert_eq!(view.podium.len(), 3);
        assert_eq!(view.tracked_wallets, SMART_WALLETS.len());

        assert!(screener.live_leaderboard().await.is_empty());
        assert!(screener.ticker().await.is_empty());
        assert!(screener.subgraph_pnl(10).await.is_empty());
    }

    fn ticker_stats(symbol: &str, last: &str, change_pct: &str) -> TickerStats {
        serde_json::from_value(json!({
            "symbol": symbol,
            "priceChange": "0",
            "priceChangePercent": change_pct,
            "highPrice": last,
            "lowPrice": last,
            "volume": "0",
            "lastPrice": last
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_ticker_skips_failed_symbols() {
        let screener = Screener::new(FakeSource {
            tickers: vec![
                ticker_stats("BTCUSDT", "69000", "1.5"),
                ticker_stats("SOLUSDT", "150", "-2"),
            ],
            ..Default::default()
        });
        let quotes = screener.ticker().await;
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].price, 69000.0);
        assert_eq!(quotes[1].change_pct, -2.0);
    }
}
