//! Smart-wallet attribution for a market
//!
//! Real attribution comes from the market's holder list. When none of the
//! tracked wallets show up there, a placeholder set is derived from a hash
//! of the condition ID. The placeholder is a stand-in for missing data, not
//! a prediction, and is always tagged [`AttributionSource::Simulated`].

use crate::api::polymarket::MarketHolder;
use crate::types::Outcome;
use crate::wallets::{find_smart_wallet, SMART_WALLETS};
use serde::Serialize;

/// Max placeholder wallets per market is `SIMULATED_MODULUS - 1`
const SIMULATED_MODULUS: u64 = 6;
const WALLET_STRIDE: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributionSource {
    /// Matched against the live holder list
    Holders,
    /// Hash-seeded placeholder
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartWalletPosition {
    pub address: String,
    pub username: String,
    pub outcome: Outcome,
    pub shares: f64,
    pub value: f64,
    pub unrealized_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribution {
    pub source: AttributionSource,
    pub positions: Vec<SmartWalletPosition>,
}

impl Attribution {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_simulated(&self) -> bool {
        self.source == AttributionSource::Simulated
    }

    pub fn contains_wallet(&self, address: &str) -> bool {
        self.positions
            .iter()
            .any(|p| p.address.eq_ignore_ascii_case(address))
    }
}

/// Sum of UTF-16 code units, the seed shared by every placeholder derivation
pub fn id_hash(id: &str) -> u64 {
    id.encode_utf16().map(u64::from).sum()
}

/// Number of smart wallets shown for a market in list views (0–5)
pub fn smart_wallet_count(id: &str) -> u32 {
    if id.is_empty() {
        return 0;
    }
    (id_hash(id) % SIMULATED_MODULUS) as u32
}

/// Attribute tracked wallets to a market, preferring real holder data
pub fn attribute_smart_wallets(condition_id: &str, holders: &[MarketHolder]) -> Attribution {
    let positions: Vec<SmartWalletPosition> = holders
        .iter()
        .filter_map(|holder| {
            let wallet = find_smart_wallet(&holder.address)?;
            Some(SmartWalletPosition {
                address: holder.address.clone(),
                username: wallet.username.to_string(),
                outcome: holder.outcome_side(),
                shares: holder.balance,
                value: holder.balance,
                unrealized_pnl: holder.pnl.unwrap_or(0.0),
            })
        })
        .collect();

    if positions.is_empty() && !condition_id.is_empty() {
        return simulate_smart_wallets(condition_id);
    }

    Attribution {
        source: AttributionSource::Holders,
        positions,
    }
}

/// Deterministic placeholder attribution seeded from the condition ID
pub fn simulate_smart_wallets(condition_id: &str) -> Attribution {
    let hash = id_hash(condition_id);
    let count = hash % SIMULATED_MODULUS;
    let n = SMART_WALLETS.len() as u64;

    let positions = (0..count)
        .map(|i| {
            let wallet = &SMART_WALLETS[((hash + i * WALLET_STRIDE) % n) as usize];
            let seed = hash * (i + 1);
            SmartWalletPosition {
                address: wallet.address.to_string(),
                username: wallet.username.to_string(),
                outcome: if (hash + i) % 3 != 0 { Outcome::Yes } else { Outcome::No },
                shares: (1_000 + seed % 50_000) as f64,
                value: (50_000 + seed % 500_000) as f64,
                unrealized_pnl: (seed % 100_000) as f64 - 30_000.0,
            }
        })
        .collect();

    Attribution {
        source: AttributionSource::Simulated,
        positions,
    }
}
