//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the trailing window. First defined value at index
//! `window - 1`; earlier positions are `None`, never a placeholder number.

/// Rolling mean of `values` over `window` points.
///
/// Also used for the volume moving average — the input is any aligned series,
/// not necessarily closes.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    assert!(window >= 1, "SMA window must be >= 1");
    let n = values.len();
    let mut result = vec![None; n];

    if n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        let sum: f64 = slice.iter().sum();
        result[i] = Some(sum / window as f64);
    }

    result
}
