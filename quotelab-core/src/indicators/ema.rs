//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * value[t] + (1 - alpha) * EMA[t-1] with
//! alpha = 2 / (span + 1), seeded by the first value. Unlike the windowed
//! indicators there is no warm-up cutoff: the EMA is defined from index 0
//! and simply grows more accurate as bars accumulate.

/// EMA of `values` with the given span. Empty input yields an empty vector.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");
    let n = values.len();
    let mut result = Vec::with_capacity(n);

    if n == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    result.push(prev);

    for &v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        result.push(prev);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_span_1_equals_input() {
        let result = ema(&[100.0, 200.0, 300.0], 1);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // alpha = 2/(3+1) = 0.5, seeded by the first value
        // EMA[0] = 10
        // EMA[1] = 0.5*11 + 0.5*10 = 10.5
        // EMA[2] = 0.5*12 + 0.5*10.5 = 11.25
        let result = ema(&[10.0, 11.0, 12.0], 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 10.5, DEFAULT_EPSILON);
        assert_approx(result[2], 11.25, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_defined_from_index_zero() {
        let result = ema(&[42.0], 26);
        assert_eq!(result.len(), 1);
        assert_approx(result[0], 42.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_empty_input() {
        assert!(ema(&[], 12).is_empty());
    }

    #[test]
    fn ema_converges_to_constant_input() {
        let values = vec![50.0; 200];
        let result = ema(&values, 12);
        assert_approx(result[199], 50.0, DEFAULT_EPSILON);
    }
}
