//! Smart-wallet leaderboard: rows derived from the tracked wallet table
//!
//! Lifetime PNL and rank come from the bundled table. The realized/unrealized
//! split, win rate, trade count and volume are randomized per render. The
//! live Data API leaderboard is annotated with tracked usernames separately.

use crate::api::polymarket::LeaderboardEntry;
use crate::format::short_address;
use crate::wallets::{find_smart_wallet, SmartWallet};
use rand::Rng;
use serde::Serialize;

/// Rows shown on the podium
pub const PODIUM_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: usize,
    pub username: String,
    pub twitter: String,
    /// Full wallet address
    pub wallet: String,
    /// `0x1234...abcd`
    pub address: String,
    pub pnl: f64,
    pub realized_pnl: f64,
    pub unrealized_pnl: f64,
    /// Fraction in [0.50, 0.75)
    pub win_rate: f64,
    pub trades: u32,
    pub volume: f64,
}

impl LeaderboardRow {
    pub fn is_podium(&self) -> bool {
        self.rank <= PODIUM_SIZE
    }
}

/// A live Data API leaderboard entry, tagged when it belongs to a tracked wallet
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveLeaderboardRow {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub tracked_username: Option<String>,
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Build one row per wallet in table order; rank is position + 1
pub fn derive_leaderboard<R: Rng + ?Sized>(wallets: &[SmartWallet], rng: &mut R) -> Vec<LeaderboardRow> {
    wallets
        .iter()
        .enumerate()
        .map(|(i, wallet)| {
            let unrealized = (rng.gen::<f64>() - 0.3) * wallet.pnl * 0.15;
            LeaderboardRow {
                rank: i + 1,
                username: wallet.username.to_string(),
                twitter: wallet.twitter.to_string(),
                wallet: wallet.address.to_string(),
                address: short_address(wallet.address),
                pnl: wallet.pnl,
                realized_pnl: wallet.pnl - unrealized,
                unrealized_pnl: unrealized,
                win_rate: 0.50 + rng.gen::<f64>() * 0.25,
                trades: 100 + (rng.gen::<f64>() * 5000.0).floor() as u32,
                volume: wallet.pnl * (3.0 + rng.gen::<f64>() * 8.0),
            }
        })
        .collect()
}

/// [`derive_leaderboard`] with the thread-local generator
pub fn derive_leaderboard_random(wallets: &[SmartWallet]) -> Vec<LeaderboardRow> {
    derive_leaderboard(wallets, &mut rand::thread_rng())
}

/// Case-insensitive substring match on username or twitter handle
pub fn filter_leaderboard(rows: &[LeaderboardRow], search: &str) -> Vec<LeaderboardRow> {
    let q = search.trim().to_lowercase();
    if q.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|r| r.username.to_lowercase().contains(&q) || r.twitter.to_lowercase().contains(&q))
        .cloned()
        .collect()
}

pub fn total_pnl(rows: &[LeaderboardRow]) -> f64 {
    rows.iter().map(|r| r.pnl).sum()
}

/// First three rows of an already-filtered list
pub fn podium(rows: &[LeaderboardRow]) -> &[LeaderboardRow] {
    &rows[..rows.len().min(PODIUM_SIZE)]
}

/// Tag live entries whose wallet is in the tracked table
pub fn annotate_live_leaderboard(entries: Vec<LeaderboardEntry>) -> Vec<LiveLeaderboardRow> {
    entries
        .into_iter()
        .map(|entry| {
            let tracked_username = entry
                .proxy_wallet
                .as_deref()
                .and_then(find_smart_wallet)
                .map(|w| w.username.to_string());
            LiveLeaderboardRow {
                entry,
                tracked_username,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallets::SMART_WALLETS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rows() -> Vec<LeaderboardRow> {
        derive_leaderboard(&SMART_WALLETS, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_one_row_per_wallet_in_order() {
        let rows = rows();
        assert_eq!(rows.len(), SMART_WALLETS.len());
        for (i, (row, wallet)) in rows.iter().zip(SMART_WALLETS.iter()).enumerate() {
            assert_eq!(row.rank, i + 1);
            assert_eq!(row.username, wallet.username);
            assert_eq!(row.pnl, wallet.pnl);
            assert_eq!(row.address, short_address(wallet.address));
        }
    }

    #[test]
    fn test_row_ranges() {
        for row in rows() {
            assert!((row.realized_pnl + row.unrealized_pnl - row.pnl).abs() < 1e-6);
            assert!(row.unrealized_pnl >= -0.3 * row.pnl * 0.15 - 1e-9);
            assert!(row.unrealized_pnl < 0.7 * row.pnl * 0.15 + 1e-9);
            assert!((0.50..0.75).contains(&row.win_rate));
            assert!((100..5100).contains(&row.trades));
            assert!(row.volume >= row.pnl * 3.0 && row.volume < row.pnl * 11.0);
        }
    }

    #[test]
    fn test_filter_by_username_or_twitter() {
        let rows = rows();
        let target = &SMART_WALLETS[0];
        let by_name = filter_leaderboard(&rows, &target.username.to_uppercase());
        assert!(by_name.iter().any(|r| r.username == target.username));

        assert_eq!(filter_leaderboard(&rows, "  ").len(), rows.len());
        assert!(filter_leaderboard(&rows, "zzzz-no-such-trader").is_empty());
    }

    #[test]
    fn test_total_and_podium() {
        let rows = rows();
        assert_eq!(total_pnl(&rows), crate::wallets::total_tracked_pnl());
        let top = podium(&rows);
        assert_eq!(top.len(), PODIUM_SIZE);
        assert!(top.iter().all(|r| r.is_podium()));
        assert_eq!(podium(&rows[..1]).len(), 1);
        assert!(podium(&[]).is_empty());
    }

    #[test]
    fn test_annotate_live() {
        let tracked = SMART_WALLETS[2].address.to_uppercase().replace("0X", "0x");
        let entries: Vec<LeaderboardEntry> = serde_json::from_value(serde_json::json!([
            { "rank": "1", "proxyWallet": tracked, "pnl": 1000 },
            { "rank": 2, "proxyWallet": "0x0000000000000000000000000000000000000001", "pnl": "900.5" },
            { "rank": 3 }
        ]))
        .unwrap();
        let live = annotate_live_leaderboard(entries);
        assert_eq!(live[0].tracked_username.as_deref(), Some(SMART_WALLETS[2].username));
        assert_eq!(live[1].tracked_username, None);
        assert_eq!(live[1].entry.pnl, Some(900.5));
        assert_eq!(live[2].tracked_username, None);
    }
}
