//! Indicator engine — pure transforms over a bar series.
//!
//! Each indicator lives in its own module as a free function over aligned
//! `f64` slices. `IndicatorSet::compute` assembles the full fixed set the
//! report consumes. The set is a struct, not a map: a missing or renamed
//! indicator is a compile error, not a silent lookup miss.
//!
//! "Not yet computable" is `None`, distinct from a computed value of zero.
//! Short series are never an error — only an empty one is.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use rsi::rsi;
pub use sma::sma;

use crate::domain::BarSeries;
use thiserror::Error;

/// RSI lookback.
pub const RSI_PERIOD: usize = 14;
/// Bollinger window and band width.
pub const BOLLINGER_WINDOW: usize = 20;
pub const BOLLINGER_K: f64 = 2.0;
/// Volume moving-average window.
pub const VOLUME_MA_WINDOW: usize = 20;

#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("cannot compute indicators on an empty series")]
    EmptySeries,
}

/// The full indicator set, every sequence aligned index-for-index with the
/// source series.
///
/// MACD-family entries are always `Some` (their EMAs seed at index 0); they
/// share the `Option` representation so every field reads uniformly at any
/// index.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub ma5: Vec<Option<f64>>,
    pub ma10: Vec<Option<f64>>,
    pub ma20: Vec<Option<f64>>,
    pub rsi14: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_hist: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_middle: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
    pub volume_ma20: Vec<Option<f64>>,
}

impl IndicatorSet {
    /// Compute every indicator for the series.
    ///
    /// Pure: no I/O, no hidden state. Fails only on an empty series; every
    /// indicator independently reports `None` for positions it cannot fill.
    pub fn compute(series: &BarSeries) -> Result<Self, IndicatorError> {
        if series.is_empty() {
            return Err(IndicatorError::EmptySeries);
        }

        let closes = series.closes();
        let volumes = series.volumes();

        let macd_series = macd(&closes);
        let bands = bollinger(&closes, BOLLINGER_WINDOW, BOLLINGER_K);

        Ok(Self {
            ma5: sma(&closes, 5),
            ma10: sma(&closes, 10),
            ma20: sma(&closes, 20),
            rsi14: rsi(&closes, RSI_PERIOD),
            macd: macd_series.macd.iter().copied().map(Some).collect(),
            macd_signal: macd_series.signal.iter().copied().map(Some).collect(),
            macd_hist: macd_series.hist.iter().copied().map(Some).collect(),
            bb_upper: bands.upper,
            bb_middle: bands.middle,
            bb_lower: bands.lower,
            volume_ma20: sma(&volumes, VOLUME_MA_WINDOW),
        })
    }

    /// Number of positions, equal to the source series length.
    pub fn len(&self) -> usize {
        self.ma5.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ma5.is_empty()
    }
}

/// Create a bar series from close prices for testing.
///
/// Generates plausible OHLV around the closes: open = previous close,
/// high/low bracket the body, constant volume.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> BarSeries {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect();
    BarSeries::from_bars(bars)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
