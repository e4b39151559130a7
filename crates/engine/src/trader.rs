//! Per-wallet trader stats and market trade rows

use crate::api::polymarket::{TraderPosition, TraderTrade};
use crate::format::short_address;
use crate::wallets::find_smart_wallet;
use serde::Serialize;

/// Trades summed into `recent_flows`
pub const RECENT_FLOW_TRADES: usize = 10;
/// Trades requested for a trader card
pub const TRADER_TRADE_LIMIT: u32 = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderStats {
    pub address: String,
    pub display_name: String,
    pub pnl: f64,
    pub position_value: f64,
    pub total_trades: usize,
    /// Percent of positions in profit
    pub win_rate: f64,
    pub avg_trade_size: f64,
    /// Signed notional of the newest trades: sells positive, buys negative
    pub recent_flows: Vec<f64>,
}

impl TraderStats {
    /// Zeroed stats for a wallet whose data could not be loaded
    pub fn empty(address: &str, username: Option<&str>) -> Self {
        Self {
            address: address.to_string(),
            display_name: display_name(address, username),
            ..Default::default()
        }
    }
}

/// A market fill reshaped for the trade tape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTrade {
    pub wallet: String,
    pub side: String,
    pub outcome: String,
    pub size: f64,
    pub price: f64,
    /// size × price
    pub value: f64,
    pub timestamp: Option<i64>,
    /// Set when the trader is a tracked smart wallet
    pub username: Option<String>,
}

/// Username when non-blank, else the short address
pub fn display_name(address: &str, username: Option<&str>) -> String {
    match username.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => short_address(address),
    }
}

pub fn compute_trader_stats(
    address: &str,
    username: Option<&str>,
    positions: &[TraderPosition],
    trades: &[TraderTrade],
) -> TraderStats {
    let pnl = positions.iter().filter_map(|p| p.cash_pnl).sum();
    let position_value = positions.iter().filter_map(|p| p.current_value).sum();

    let wins = positions
        .iter()
        .filter(|p| p.cash_pnl.unwrap_or(0.0) > 0.0)
        .count();
    let win_rate = if positions.is_empty() {
        0.0
    } else {
        wins as f64 / positions.len() as f64 * 100.0
    };

    let avg_trade_size = if trades.is_empty() {
        0.0
    } else {
        trades.iter().map(TraderTrade::notional).sum::<f64>() / trades.len() as f64
    };

    let recent_flows = trades
        .iter()
        .take(RECENT_FLOW_TRADES)
        .map(|t| if t.is_sell() { t.notional() } else { -t.notional() })
        .collect();

    TraderStats {
        address: address.to_string(),
        display_name: display_name(address, username),
        pnl,
        position_value,
        total_trades: trades.len(),
        win_rate,
        avg_trade_size,
        recent_flows,
    }
}

pub fn to_market_trades(trades: &[TraderTrade]) -> Vec<MarketTrade> {
    trades
        .iter()
        .map(|t| {
            let wallet = t.proxy_wallet.clone().unwrap_or_default();
            let size = t.size.unwrap_or(0.0);
            let price = t.price.unwrap_or(0.0);
            MarketTrade {
                username: find_smart_wallet(&wallet).map(|w| w.username.to_string()),
                wallet,
                side: t.side.clone().unwrap_or_default().to_uppercase(),
                outcome: t.outcome.clone().unwrap_or_default(),
                size,
                price,
                value: size * price,
                timestamp: t.timestamp,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallets::SMART_WALLETS;

    fn make_trade(side: &str, size: f64, price: f64) -> TraderTrade {
        TraderTrade {
            side: Some(side.to_string()),
            size: Some(size),
            price: Some(price),
            ..Default::default()
        }
    }

    fn make_position(cash_pnl: f64, current_value: f64) -> TraderPosition {
        TraderPosition {
            cash_pnl: Some(cash_pnl),
            current_value: Some(current_value),
            ..Default::default()
        }
    }

    #[test]
    fn test_stats_empty() {
        let stats = compute_trader_stats("0x1234567890abcdef1234567890abcdef1234abcd", None, &[], &[]);
        assert_eq!(stats.pnl, 0.0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.avg_trade_size, 0.0);
        assert!(stats.recent_flows.is_empty());
        assert_eq!(stats.display_name, "0x1234...abcd");
        assert_eq!(stats, TraderStats::empty("0x1234567890abcdef1234567890abcdef1234abcd", Some("  ")));
    }

    #[test]
    fn test_stats_aggregates() {
        let positions = vec![
            make_position(100.0, 500.0),
            make_position(-40.0, 200.0),
            make_position(0.0, 50.0),
            make_position(10.0, 0.0),
        ];
        let trades = vec![make_trade("SELL", 100.0, 0.5), make_trade("BUY", 200.0, 0.25)];
        let stats = compute_trader_stats("0xabc", Some("whale"), &positions, &trades);

        assert_eq!(stats.display_name, "whale");
        assert_eq!(stats.pnl, 70.0);
        assert_eq!(stats.position_value, 750.0);
        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.win_rate, 50.0);
        assert_eq!(stats.avg_trade_size, 50.0);
        assert_eq!(stats.recent_flows, vec![50.0, -50.0]);
    }

    #[test]
    fn test_recent_flows_capped() {
        let trades: Vec<_> = (0..25).map(|_| make_trade("BUY", 10.0, 0.1)).collect();
        let stats = compute_trader_stats("0xabc", None, &[], &trades);
        assert_eq!(stats.recent_flows.len(), RECENT_FLOW_TRADES);
        assert_eq!(stats.total_trades, 25);
    }

    #[test]
    fn test_market_trades_tag_smart_wallets() {
        let mut tracked = make_trade("buy", 100.0, 0.4);
        tracked.proxy_wallet = Some(SMART_WALLETS[1].address.to_string());
        tracked.outcome = Some("Yes".into());
        let mut other = make_trade("SELL", 10.0, 0.6);
        other.proxy_wallet = Some("0x0000000000000000000000000000000000000009".into());

        let rows = to_market_trades(&[tracked, other]);
        assert_eq!(rows[0].username.as_deref(), Some(SMART_WALLETS[1].username));
        assert_eq!(rows[0].side, "BUY");
        assert!((rows[0].value - 40.0).abs() < 1e-9);
        assert_eq!(rows[1].username, None);
        assert!((rows[1].value - 6.0).abs() < 1e-9);
    }
}
