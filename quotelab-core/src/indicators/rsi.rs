//! Relative Strength Index (RSI) with Wilder smoothing.
//!
//! Seed at index `period`: simple mean of the first `period` gains/losses.
//! Thereafter the Wilder recurrence:
//! `avg[i] = (avg[i-1] * (period - 1) + x[i]) / period`.
//!
//! Positions before the seed index are `None`. A predecessor of this engine
//! filled them with a neutral 50, which masks missing warm-up data and is
//! deliberately not reproduced here.
//!
//! Edge case: `avg_loss == 0` means RSI is 100 by definition (this also
//! covers a perfectly flat window), not a division-by-zero.

/// RSI of `closes` over `period` bars. Defined from index `period` onward.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "RSI period must be >= 1");
    let n = closes.len();
    let mut result = vec![None; n];

    if n < period + 1 {
        return result;
    }

    // Per-bar close-to-close deltas; deltas[i] is the move into bar i.
    let gain_loss = |delta: f64| (delta.max(0.0), (-delta).max(0.0));

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let (g, l) = gain_loss(closes[i] - closes[i - 1]);
        avg_gain += g;
        avg_loss += l;
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    result[period] = Some(rsi_value(avg_gain, avg_loss));

    for i in (period + 1)..n {
        let (g, l) = gain_loss(closes[i] - closes[i - 1]);
        avg_gain = (avg_gain * (period as f64 - 1.0) + g) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + l) / period as f64;
        result[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_undefined_before_seed() {
        let closes = [44.0, 44.34, 44.09, 43.61, 44.33];
        let result = rsi(&closes, 3);
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!(result[2].is_none());
        assert!(result[3].is_some());
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let closes = [100.0, 101.0, 102.0, 103.0, 104.0, 105.0];
        let result = rsi(&closes, 3);
        assert_approx(result[3].unwrap(), 100.0, 1e-9);
        assert_approx(result[5].unwrap(), 100.0, 1e-9);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes = [105.0, 104.0, 103.0, 102.0, 101.0, 100.0];
        let result = rsi(&closes, 3);
        assert_approx(result[3].unwrap(), 0.0, 1e-9);
    }

    #[test]
    fn rsi_flat_window_is_100() {
        // No movement at all: avg_loss == 0, so RSI is 100 by definition.
        let closes = [100.0, 100.0, 100.0, 100.0, 100.0];
        let result = rsi(&closes, 3);
        assert_approx(result[3].unwrap(), 100.0, 1e-9);
    }

    #[test]
    fn rsi_wilder_reference_vector() {
        // 15 closes, period 14: defined at index 14 only.
        // Seed gains sum = 7.5, losses sum = 2.5 over the first 14 deltas,
        // so RS = 7.5/2.5 = 3 and RSI = 100 - 100/4 = 75.
        let closes = [
            44.0, 44.5, 43.5, 44.5, 45.0, 45.5, 46.0, 47.0, 46.5, 46.0, 47.0, 48.0, 47.5, 48.5,
            49.0,
        ];
        let result = rsi(&closes, 14);
        for i in 0..14 {
            assert!(result[i].is_none(), "expected None at index {i}");
        }
        assert_approx(result[14].unwrap(), 75.0, 1e-9);
    }

    #[test]
    fn rsi_wilder_recurrence_after_seed() {
        // period 2, closes chosen for hand-checkable arithmetic:
        // deltas: +1, -1, +2
        // seed (index 2): avg_gain = 0.5, avg_loss = 0.5 → RSI = 50
        // index 3: avg_gain = (0.5*1 + 2)/2 = 1.25, avg_loss = (0.5*1 + 0)/2 = 0.25
        //          RS = 5 → RSI = 100 - 100/6
        let closes = [10.0, 11.0, 10.0, 12.0];
        let result = rsi(&closes, 2);
        assert_approx(result[2].unwrap(), 50.0, 1e-9);
        assert_approx(result[3].unwrap(), 100.0 - 100.0 / 6.0, 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        let result = rsi(&closes, 3);
        for (i, v) in result.iter().enumerate() {
            if let Some(v) = v {
                assert!(
                    (0.0..=100.0).contains(v),
                    "RSI out of bounds at bar {i}: {v}"
                );
            }
        }
    }

    #[test]
    fn rsi_too_few_values() {
        let result = rsi(&[100.0, 101.0], 14);
        assert!(result.iter().all(|v| v.is_none()));
        assert!(rsi(&[], 14).is_empty());
    }
}
