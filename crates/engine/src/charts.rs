//! Chart series for the market page
//!
//! Live charts bucket CLOB price history into daily candles and run the
//! `ta` indicators over the closes. When a market has no history, seeded
//! random walks stand in and the bundle is tagged [`ChartSource::Simulated`].
//! Randomness is always injected so callers and tests control the seed.

use crate::api::clob::PricePoint;
use crate::error::{ScreenerError, ScreenerResult};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use ta::indicators::{MovingAverageConvergenceDivergence, RelativeStrengthIndex, SimpleMovingAverage};
use ta::Next;

pub const SECONDS_PER_DAY: i64 = 86_400;
/// Days of simulated history (one point per day, inclusive of today)
pub const CHART_DAYS: usize = 30;
pub const SMA_FAST: usize = 7;
pub const SMA_SLOW: usize = 21;
pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSource {
    Live,
    Simulated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub time: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdPoint {
    pub time: i64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Probability candle, prices in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBundle {
    pub source: ChartSource,
    pub candles: Vec<Candle>,
    /// YES probability in percent
    pub probability: Vec<SeriesPoint>,
    pub sma_fast: Vec<SeriesPoint>,
    pub sma_slow: Vec<SeriesPoint>,
    pub rsi: Vec<SeriesPoint>,
    pub macd: Vec<MacdPoint>,
}

impl ChartBundle {
    pub fn is_live(&self) -> bool {
        self.source == ChartSource::Live
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn indicator_err(e: ta::errors::TaError) -> ScreenerError {
    ScreenerError::Indicator(format!("{e:?}"))
}

/// Daily timestamps ending at `end_ts`, oldest first (`days + 1` entries)
pub fn day_timestamps(days: usize, end_ts: i64) -> Vec<i64> {
    (0..=days as i64)
        .rev()
        .map(|i| end_ts - i * SECONDS_PER_DAY)
        .collect()
}

// ---------------------------------------------------------------------------
// Simulated walks
// ---------------------------------------------------------------------------

/// Probability random walk in percent, clamped to [5, 95]
pub fn simulate_probability<R: Rng + ?Sized>(rng: &mut R, days: usize, end_ts: i64) -> Vec<SeriesPoint> {
    let mut value = 50.0 + rng.gen::<f64>() * 20.0;
    day_timestamps(days, end_ts)
        .into_iter()
        .map(|time| {
            value = (value + (rng.gen::<f64>() - 0.48) * 5.0).clamp(5.0, 95.0);
            SeriesPoint {
                time,
                value: round_to(value, 1),
            }
        })
        .collect()
}

/// RSI-shaped random walk, clamped to [10, 90]
pub fn simulate_rsi<R: Rng + ?Sized>(rng: &mut R, days: usize, end_ts: i64) -> Vec<SeriesPoint> {
    let mut rsi = 50.0 + rng.gen::<f64>() * 20.0;
    day_timestamps(days, end_ts)
        .into_iter()
        .map(|time| {
            rsi = (rsi + (rng.gen::<f64>() - 0.5) * 10.0).clamp(10.0, 90.0);
            SeriesPoint {
                time,
                value: round_to(rsi, 1),
            }
        })
        .collect()
}

/// MACD-shaped random walk with a 0.9/0.1 smoothed signal line
pub fn simulate_macd<R: Rng + ?Sized>(rng: &mut R, days: usize, end_ts: i64) -> Vec<MacdPoint> {
    let mut macd = 0.0_f64;
    let mut signal = 0.0_f64;
    day_timestamps(days, end_ts)
        .into_iter()
        .map(|time| {
            macd = (macd + (rng.gen::<f64>() - 0.48) * 2.0).clamp(-10.0, 10.0);
            signal = signal * 0.9 + macd * 0.1;
            MacdPoint {
                time,
                macd: round_to(macd, 2),
                signal: round_to(signal, 2),
                histogram: round_to(macd - signal, 2),
            }
        })
        .collect()
}

/// Candle walk that ends exactly on `current_price`.
///
/// Built backwards from the last close, so the final candle always matches
/// the market's quoted price.
pub fn simulate_candles<R: Rng + ?Sized>(
    rng: &mut R,
    days: usize,
    end_ts: i64,
    current_price: f64,
) -> Vec<Candle> {
    let times = day_timestamps(days, end_ts);
    let n = times.len();
    let current = if current_price.is_finite() {
        current_price.clamp(0.0, 1.0)
    } else {
        0.5
    };

    let mut closes = vec![current; n];
    for i in (0..n - 1).rev() {
        closes[i] = (closes[i + 1] + (rng.gen::<f64>() - 0.5) * 0.04).clamp(0.01, 0.99);
    }

    let first_open = (closes[0] + (rng.gen::<f64>() - 0.5) * 0.02).clamp(0.0, 1.0);
    times
        .into_iter()
        .enumerate()
        .map(|(i, time)| {
            let open = if i == 0 { first_open } else { closes[i - 1] };
            let close = closes[i];
            let high = (open.max(close) + rng.gen::<f64>() * 0.015).min(1.0);
            let low = (open.min(close) - rng.gen::<f64>() * 0.015).max(0.0);
            Candle {
                time,
                open,
                high,
                low,
                close,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Indicators over closes
// ---------------------------------------------------------------------------

/// Trailing SMA over candle closes; the warm-up averages whatever is available
pub fn moving_average(candles: &[Candle], period: usize) -> ScreenerResult<Vec<SeriesPoint>> {
    let mut sma = SimpleMovingAverage::new(period).map_err(indicator_err)?;
    Ok(candles
        .iter()
        .map(|c| SeriesPoint {
            time: c.time,
            value: sma.next(c.close),
        })
        .collect())
}

/// RSI over candle closes
pub fn rsi_series(candles: &[Candle], period: usize) -> ScreenerResult<Vec<SeriesPoint>> {
    let mut rsi = RelativeStrengthIndex::new(period).map_err(indicator_err)?;
    Ok(candles
        .iter()
        .map(|c| SeriesPoint {
            time: c.time,
            value: round_to(rsi.next(c.close), 1),
        })
        .collect())
}

/// MACD over closes expressed in percentage points
pub fn macd_series(
    candles: &[Candle],
    fast: usize,
    slow: usize,
    signal: usize,
) -> ScreenerResult<Vec<MacdPoint>> {
    let mut macd =
        MovingAverageConvergenceDivergence::new(fast, slow, signal).map_err(indicator_err)?;
    Ok(candles
        .iter()
        .map(|c| {
            let out = macd.next(c.close * 100.0);
            MacdPoint {
                time: c.time,
                macd: round_to(out.macd, 2),
                signal: round_to(out.signal, 2),
                histogram: round_to(out.histogram, 2),
            }
        })
        .collect())
}

/// Bucket price history into candles of `bucket_secs`, sorted by time and clamped to [0, 1]
pub fn candles_from_history(history: &[PricePoint], bucket_secs: i64) -> Vec<Candle> {
    let bucket_secs = bucket_secs.max(1);
    let mut points: Vec<(i64, f64)> = history
        .iter()
        .filter_map(|p| Some((p.t?, p.p)))
        .filter(|(_, p)| p.is_finite())
        .map(|(t, p)| (t, p.clamp(0.0, 1.0)))
        .collect();
    points.sort_by_key(|(t, _)| *t);

    let mut buckets: BTreeMap<i64, Candle> = BTreeMap::new();
    for (t, p) in points {
        let start = t.div_euclid(bucket_secs) * bucket_secs;
        buckets
            .entry(start)
            .and_modify(|c| {
                c.high = c.high.max(p);
                c.low = c.low.min(p);
                c.close = p;
            })
            .or_insert(Candle {
                time: start,
                open: p,
                high: p,
                low: p,
                close: p,
            });
    }
    buckets.into_values().collect()
}

fn probability_series(candles: &[Candle]) -> Vec<SeriesPoint> {
    candles
        .iter()
        .map(|c| SeriesPoint {
            time: c.time,
            value: round_to(c.close * 100.0, 1),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bundles
// ---------------------------------------------------------------------------

/// Charts computed from real price history; `None` when there is nothing to plot
pub fn live_bundle(history: &[PricePoint], bucket_secs: i64) -> ScreenerResult<Option<ChartBundle>> {
    let candles = candles_from_history(history, bucket_secs);
    if candles.is_empty() {
        return Ok(None);
    }
    Ok(Some(ChartBundle {
        source: ChartSource::Live,
        probability: probability_series(&candles),
        sma_fast: moving_average(&candles, SMA_FAST)?,
        sma_slow: moving_average(&candles, SMA_SLOW)?,
        rsi: rsi_series(&candles, RSI_PERIOD)?,
        macd: macd_series(&candles, MACD_FAST, MACD_SLOW, MACD_SIGNAL)?,
        candles,
    }))
}

/// Placeholder charts anchored on the market's current price (probability in [0, 1])
pub fn simulated_bundle<R: Rng + ?Sized>(
    rng: &mut R,
    end_ts: i64,
    current_price: f64,
) -> ScreenerResult<ChartBundle> {
    let candles = simulate_candles(rng, CHART_DAYS, end_ts, current_price);
    Ok(ChartBundle {
        source: ChartSource::Simulated,
        probability: simulate_probability(rng, CHART_DAYS, end_ts),
        sma_fast: moving_average(&candles, SMA_FAST)?,
        sma_slow: moving_average(&candles, SMA_SLOW)?,
        rsi: simulate_rsi(rng, CHART_DAYS, end_ts),
        macd: simulate_macd(rng, CHART_DAYS, end_ts),
        candles,
    })
}

/// Live charts when history is available, simulated ones otherwise
pub fn chart_bundle<R: Rng + ?Sized>(
    history: &[PricePoint],
    current_price: f64,
    rng: &mut R,
    end_ts: i64,
) -> ScreenerResult<ChartBundle> {
    match live_bundle(history, SECONDS_PER_DAY)? {
        Some(bundle) => Ok(bundle),
        None => simulated_bundle(rng, end_ts, current_price),
    }
}
