//! Upstream endpoint configuration
//!
//! Every endpoint defaults to the public Polymarket / Goldsky / Binance host
//! and can be overridden through `POLYSCREENER_*` environment variables.

use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_GAMMA_URL: &str = "https://gamma-api.polymarket.com";
pub const DEFAULT_CLOB_URL: &str = "https://clob.polymarket.com";
pub const DEFAULT_DATA_URL: &str = "https://data-api.polymarket.com";
pub const DEFAULT_BINANCE_URL: &str = "https://api.binance.com";

const GOLDSKY_PROJECT: &str =
    "https://api.goldsky.com/api/public/project_cl6mb8i9h0003e201j6li0diw/subgraphs";

/// Goldsky-hosted Polymarket subgraphs (public, no auth)
#[derive(Debug, Clone, Serialize)]
pub struct SubgraphEndpoints {
    pub positions: String,
    pub activity: String,
    pub pnl: String,
    pub orders: String,
    pub open_interest: String,
}

impl Default for SubgraphEndpoints {
    fn default() -> Self {
        Self {
            positions: format!("{GOLDSKY_PROJECT}/positions-subgraph/0.0.7/gn"),
            activity: format!("{GOLDSKY_PROJECT}/activity-subgraph/0.0.4/gn"),
            pnl: format!("{GOLDSKY_PROJECT}/pnl-subgraph/0.0.14/gn"),
            orders: format!("{GOLDSKY_PROJECT}/orderbook-subgraph/0.0.1/gn"),
            open_interest: format!("{GOLDSKY_PROJECT}/oi-subgraph/0.0.6/gn"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenerConfig {
    pub gamma_url: String,
    pub clob_url: String,
    pub data_url: String,
    pub binance_url: String,
    pub subgraphs: SubgraphEndpoints,
    /// Per-request timeout (default: 30s)
    pub http_timeout_secs: u64,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            gamma_url: DEFAULT_GAMMA_URL.to_string(),
            clob_url: DEFAULT_CLOB_URL.to_string(),
            data_url: DEFAULT_DATA_URL.to_string(),
            binance_url: DEFAULT_BINANCE_URL.to_string(),
            subgraphs: SubgraphEndpoints::default(),
            http_timeout_secs: 30,
        }
    }
}

impl ScreenerConfig {
    /// Build from `POLYSCREENER_*` env vars, falling back to the public endpoints
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str, default: String| lookup(key).filter(|v| !v.is_empty()).unwrap_or(default);

        Self {
            gamma_url: var("POLYSCREENER_GAMMA_URL", defaults.gamma_url),
            clob_url: var("POLYSCREENER_CLOB_URL", defaults.clob_url),
            data_url: var("POLYSCREENER_DATA_URL", defaults.data_url),
            binance_url: var("POLYSCREENER_BINANCE_URL", defaults.binance_url),
            subgraphs: SubgraphEndpoints {
                positions: var("POLYSCREENER_SUBGRAPH_POSITIONS", defaults.subgraphs.positions),
                activity: var("POLYSCREENER_SUBGRAPH_ACTIVITY", defaults.subgraphs.activity),
                pnl: var("POLYSCREENER_SUBGRAPH_PNL", defaults.subgraphs.pnl),
                orders: var("POLYSCREENER_SUBGRAPH_ORDERS", defaults.subgraphs.orders),
                open_interest: var("POLYSCREENER_SUBGRAPH_OI", defaults.subgraphs.open_interest),
            },
            http_timeout_secs: lookup("POLYSCREENER_HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
        }
    }

    /// Point every REST endpoint at one base URL (local stubs, proxies)
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            gamma_url: base.clone(),
            clob_url: base.clone(),
            data_url: base.clone(),
            binance_url: base.clone(),
            subgraphs: SubgraphEndpoints {
                positions: format!("{base}/subgraphs/positions"),
                activity: format!("{base}/subgraphs/activity"),
                pnl: format!("{base}/subgraphs/pnl"),
                orders: format!("{base}/subgraphs/orders"),
                open_interest: format!("{base}/subgraphs/oi"),
            },
            http_timeout_secs: 5,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_env_missing() {
        let config = ScreenerConfig::from_lookup(|_| None);
        assert_eq!(config.gamma_url, DEFAULT_GAMMA_URL);
        assert_eq!(config.http_timeout_secs, 30);
        assert!(config.subgraphs.pnl.ends_with("pnl-subgraph/0.0.14/gn"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("POLYSCREENER_CLOB_URL", "http://localhost:9000"),
            ("POLYSCREENER_HTTP_TIMEOUT_SECS", "7"),
            ("POLYSCREENER_DATA_URL", ""),
        ]
        .into_iter()
        .collect();
        let config = ScreenerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.clob_url, "http://localhost:9000");
        assert_eq!(config.http_timeout_secs, 7);
        // empty values fall back to the default
        assert_eq!(config.data_url, DEFAULT_DATA_URL);
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let config = ScreenerConfig::with_base_url("http://127.0.0.1:4000/");
        assert_eq!(config.gamma_url, "http://127.0.0.1:4000");
        assert_eq!(config.subgraphs.orders, "http://127.0.0.1:4000/subgraphs/orders");
    }
}
