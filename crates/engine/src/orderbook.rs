//! Order-book depth and spread over a CLOB snapshot

use crate::api::clob::{OrderBookSnapshot, RawLevel};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

/// Levels kept per side
pub const BOOK_DEPTH: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthLevel {
    pub price: Decimal,
    pub size: Decimal,
    /// price × size, zero if that overflows
    pub total: Decimal,
    /// Bar width relative to the largest level on either side, 0–100
    pub depth_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookView {
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
    pub max_size: Decimal,
    pub spread: Decimal,
    pub spread_pct: f64,
}

impl OrderBookView {
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

fn parse_level(level: &RawLevel) -> Option<(Decimal, Decimal)> {
    let price = Decimal::from_str(level.price.trim()).ok()?;
    let size = Decimal::from_str(level.size.trim()).ok()?;
    Some((price, size))
}

/// Parse up to [`BOOK_DEPTH`] levels in upstream order, skipping malformed ones
fn parse_side(levels: &[RawLevel]) -> Vec<(Decimal, Decimal)> {
    let parsed: Vec<_> = levels.iter().filter_map(parse_level).take(BOOK_DEPTH).collect();
    if parsed.len() < levels.len().min(BOOK_DEPTH) {
        debug!(raw = levels.len(), parsed = parsed.len(), "Skipped unparseable book levels");
    }
    parsed
}

/// `part / whole × 100`, or zero when the ratio is undefined or overflows `Decimal`
fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
        .unwrap_or(0.0)
}

fn depth_pct(size: Decimal, max_size: Decimal) -> f64 {
    if max_size.is_zero() {
        return 0.0;
    }
    percent_of(size, max_size)
}

/// Spread between the best ask and best bid; zero when either side is empty
pub fn spread(bids: &[DepthLevel], asks: &[DepthLevel]) -> Decimal {
    match (bids.first(), asks.first()) {
        (Some(bid), Some(ask)) => ask.price.checked_sub(bid.price).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Spread as a percentage of the best bid; zero without a positive bid
pub fn spread_pct(spread: Decimal, best_bid: Option<Decimal>) -> f64 {
    match best_bid {
        Some(bid) if !bid.is_zero() => percent_of(spread, bid),
        _ => 0.0,
    }
}

/// Build the depth view; input ordering is trusted, not re-sorted
pub fn build_order_book(snapshot: &OrderBookSnapshot) -> OrderBookView {
    let bids = parse_side(&snapshot.bids);
    let asks = parse_side(&snapshot.asks);

    let max_size = bids
        .iter()
        .chain(asks.iter())
        .map(|(_, size)| *size)
        .max()
        .unwrap_or(Decimal::ZERO);

    let to_levels = |side: Vec<(Decimal, Decimal)>| -> Vec<DepthLevel> {
        side.into_iter()
            .map(|(price, size)| DepthLevel {
                price,
                size,
                total: price.checked_mul(size).unwrap_or(Decimal::ZERO),
                depth_pct: depth_pct(size, max_size),
            })
            .collect()
    };
    let bids = to_levels(bids);
    let asks = to_levels(asks);

    let spread = spread(&bids, &asks);
    let spread_pct = spread_pct(spread, bids.first().map(|l| l.price));

    OrderBookView {
        bids,
        asks,
        max_size,
        spread,
        spread_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot(bids: &[(&str, &str)], asks: &[(&str, &str)]) -> OrderBookSnapshot {
        OrderBookSnapshot {
            bids: bids.iter().map(|(p, s)| RawLevel::new(*p, *s)).collect(),
            asks: asks.iter().map(|(p, s)| RawLevel::new(*p, *s)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_spread_and_depth() {
        let book = build_order_book(&snapshot(
            &[("0.48", "1000"), ("0.47", "500")],
            &[("0.52", "2000"), ("0.53", "250")],
        ));

        assert_eq!(book.spread, dec!(0.04));
        assert!((book.spread_pct - 4.0 / 0.48).abs() < 1e-9);
        assert_eq!(book.max_size, dec!(2000));

        assert_eq!(book.bids[0].total, dec!(480));
        assert_eq!(book.bids[0].depth_pct, 50.0);
        assert_eq!(book.asks[0].depth_pct, 100.0);
        assert_eq!(book.asks[1].depth_pct, 12.5);
        for level in book.bids.iter().chain(book.asks.iter()) {
            assert!((0.0..=100.0).contains(&level.depth_pct));
        }
    }

    #[test]
    fn test_empty_side_zero_spread() {
        let book = build_order_book(&snapshot(&[("0.40", "10")], &[]));
        assert_eq!(book.spread, Decimal::ZERO);
        assert_eq!(book.spread_pct, 0.0);
        assert_eq!(book.best_bid(), Some(dec!(0.40)));
        assert_eq!(book.best_ask(), None);
    }

    #[test]
    fn test_empty_book() {
        let book = build_order_book(&OrderBookSnapshot::default());
        assert!(book.is_empty());
        assert_eq!(book.max_size, Decimal::ZERO);
        assert_eq!(book.spread, Decimal::ZERO);
    }

    #[test]
    fn test_zero_bid_guard() {
        let book = build_order_book(&snapshot(&[("0", "10")], &[("0.02", "10")]));
        assert_eq!(book.spread, dec!(0.02));
        assert_eq!(book.spread_pct, 0.0);
    }

    #[test]
    fn test_zero_sizes_give_zero_depth() {
        let book = build_order_book(&snapshot(&[("0.4", "0")], &[("0.6", "0")]));
        assert_eq!(book.bids[0].depth_pct, 0.0);
        assert_eq!(book.asks[0].depth_pct, 0.0);
    }

    #[test]
    fn test_skips_bad_levels_and_caps_depth() {
        let mut bids: Vec<(String, String)> = vec![("oops".into(), "1".into())];
        bids.extend((0..20).map(|i| (format!("0.{:02}", 40 - i), "10".to_string())));
        let raw: Vec<(&str, &str)> = bids.iter().map(|(p, s)| (p.as_str(), s.as_str())).collect();

        let book = build_order_book(&snapshot(&raw, &[]));
        assert_eq!(book.bids.len(), BOOK_DEPTH);
        assert_eq!(book.bids[0].price, dec!(0.40));
    }

    #[test]
    fn test_extreme_levels_do_not_overflow() {
        let book = build_order_book(&snapshot(
            &[("0.0000000000000000000000000001", "10")],
            &[("0.5", "10")],
        ));
        assert_eq!(book.spread, dec!(0.4999999999999999999999999999));
        assert_eq!(book.spread_pct, 0.0);

        let huge = Decimal::MAX.to_string();
        let book = build_order_book(&snapshot(&[(huge.as_str(), huge.as_str())], &[("-1", "1")]));
        assert_eq!(book.bids[0].total, Decimal::ZERO);
        assert_eq!(book.spread, Decimal::ZERO);
        assert_eq!(book.bids[0].depth_pct, 100.0);
    }

    #[test]
    fn test_upstream_order_is_kept() {
        // not re-sorted: first listed bid is treated as best
        let book = build_order_book(&snapshot(&[("0.30", "5"), ("0.45", "5")], &[("0.50", "5")]));
        assert_eq!(book.spread, dec!(0.20));
    }
}
