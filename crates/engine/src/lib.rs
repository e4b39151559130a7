//! Polyscreener engine: Polymarket market-data screening
//!
//! Provides:
//! - Clients for the Gamma, CLOB, Data API, Goldsky subgraph and Binance endpoints
//! - Smart-wallet attribution (real holders, or a hash-seeded placeholder)
//! - Market list views, category matching and yes/no pricing
//! - Order-book depth/spread and chart series (live or simulated)
//! - Derived smart-wallet leaderboard and per-trader stats
//! - The [`Screener`] service that composes them with graceful degradation

pub mod api;
pub mod attribution;
pub mod category;
pub mod charts;
pub mod config;
pub mod error;
pub mod format;
pub mod leaderboard;
pub mod markets;
pub mod orderbook;
pub mod service;
pub mod trader;
pub mod types;
pub mod wallets;

// Re-exports for convenience
pub use api::{BinanceClient, ClobClient, GammaClient, PolymarketDataClient, SubgraphClient};
pub use attribution::{
    attribute_smart_wallets, simulate_smart_wallets, smart_wallet_count, Attribution,
    AttributionSource, SmartWalletPosition,
};
pub use category::{match_category, Category};
pub use charts::{ChartBundle, ChartSource};
pub use config::{ScreenerConfig, SubgraphEndpoints};
pub use error::{ScreenerError, ScreenerResult};
pub use leaderboard::{derive_leaderboard, LeaderboardRow, LiveLeaderboardRow};
pub use markets::{ListedMarket, MarketSummary, Sector};
pub use orderbook::{build_order_book, DepthLevel, OrderBookView};
pub use service::{
    HttpMarketSource, LeaderboardView, MarketDetail, MarketListing, MarketSource, Screener,
};
pub use trader::{MarketTrade, TraderStats};
pub use types::*;
pub use wallets::{find_smart_wallet, normalize_wallet_address, SmartWallet, SMART_WALLETS};
