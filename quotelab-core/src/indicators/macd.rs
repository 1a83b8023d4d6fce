//! MACD — Moving Average Convergence/Divergence.
//!
//! `macd = EMA(fast) - EMA(slow)`, signal = EMA of the MACD line, histogram
//! = macd - signal. Because the underlying EMAs are seeded by the first
//! close, all three series are defined from index 0; their early values are
//! simply less settled.

use super::ema::ema;

pub const FAST_SPAN: usize = 12;
pub const SLOW_SPAN: usize = 26;
pub const SIGNAL_SPAN: usize = 9;

/// The three MACD series, aligned with the input.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub hist: Vec<f64>,
}

/// MACD(12, 26, 9) of the closes.
pub fn macd(closes: &[f64]) -> MacdSeries {
    macd_with(closes, FAST_SPAN, SLOW_SPAN, SIGNAL_SPAN)
}

/// MACD with explicit spans.
pub fn macd_with(closes: &[f64], fast: usize, slow: usize, signal_span: usize) -> MacdSeries {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let macd: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema(&macd, signal_span);
    let hist: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries { macd, signal, hist }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn single_bar_macd_is_zero() {
        // Both EMAs seed to the lone close, so macd = signal = hist = 0.
        let result = macd(&[100.0]);
        assert_eq!(result.macd.len(), 1);
        assert_approx(result.macd[0], 0.0, DEFAULT_EPSILON);
        assert_approx(result.signal[0], 0.0, DEFAULT_EPSILON);
        assert_approx(result.hist[0], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn constant_closes_give_zero_macd() {
        let closes = vec![50.0; 60];
        let result = macd(&closes);
        for i in 0..60 {
            assert_approx(result.macd[i], 0.0, DEFAULT_EPSILON);
            assert_approx(result.hist[i], 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn hist_is_macd_minus_signal_everywhere() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let result = macd(&closes);
        for i in 0..closes.len() {
            assert_approx(
                result.hist[i],
                result.macd[i] - result.signal[i],
                DEFAULT_EPSILON,
            );
        }
    }

    #[test]
    fn rising_closes_give_positive_macd() {
        // Fast EMA tracks a steady uptrend more closely than the slow EMA.
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let result = macd(&closes);
        assert!(result.macd[59] > 0.0);
    }

    #[test]
    fn macd_empty_input() {
        let result = macd(&[]);
        assert!(result.macd.is_empty());
        assert!(result.signal.is_empty());
        assert!(result.hist.is_empty());
    }
}
