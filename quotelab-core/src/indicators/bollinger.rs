//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Middle band is SMA(window); upper/lower are middle +/- k * sigma, where
//! sigma is the sample standard deviation (divide by n-1) of the same
//! trailing window. Undefined before index window-1.

/// The three bands, aligned with the input.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Bollinger Bands of `values` over `window` points with multiplier `k`.
pub fn bollinger(values: &[f64], window: usize, k: f64) -> BollingerBands {
    assert!(window >= 1, "Bollinger window must be >= 1");
    let n = values.len();
    let mut upper = vec![None; n];
    let mut middle = vec![None; n];
    let mut lower = vec![None; n];

    if n >= window {
        for i in (window - 1)..n {
            let slice = &values[(i + 1 - window)..=i];
            let mean = slice.iter().sum::<f64>() / window as f64;

            // Sample standard deviation; a 1-point window has no spread.
            let sigma = if window > 1 {
                let var = slice
                    .iter()
                    .map(|v| {
                        let d = v - mean;
                        d * d
                    })
                    .sum::<f64>()
                    / (window as f64 - 1.0);
                var.sqrt()
            } else {
                0.0
            };

            middle[i] = Some(mean);
            upper[i] = Some(mean + k * sigma);
            lower[i] = Some(mean - k * sigma);
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn middle_band_is_sma() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        let bands = bollinger(&values, 3, 2.0);

        assert!(bands.middle[0].is_none());
        assert!(bands.middle[1].is_none());
        assert_approx(bands.middle[2].unwrap(), 11.0, DEFAULT_EPSILON);
        assert_approx(bands.middle[3].unwrap(), 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bands_use_sample_stddev() {
        // Window [10, 11, 12]: mean 11, sample variance (1+0+1)/2 = 1, sigma 1.
        let values = [10.0, 11.0, 12.0];
        let bands = bollinger(&values, 3, 2.0);
        assert_approx(bands.upper[2].unwrap(), 13.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[2].unwrap(), 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bands_are_symmetric_about_middle() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0, 13.0, 12.0];
        let bands = bollinger(&values, 3, 2.0);
        for i in 2..values.len() {
            let up = bands.upper[i].unwrap() - bands.middle[i].unwrap();
            let down = bands.middle[i].unwrap() - bands.lower[i].unwrap();
            assert_approx(up, down, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn constant_input_collapses_bands() {
        let values = [100.0, 100.0, 100.0, 100.0];
        let bands = bollinger(&values, 3, 2.0);
        assert_approx(bands.upper[3].unwrap(), 100.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[3].unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ordering_holds_wherever_defined() {
        let values = [5.0, 9.0, 2.0, 7.0, 4.0, 8.0, 3.0];
        let bands = bollinger(&values, 4, 2.0);
        for i in 0..values.len() {
            if let (Some(u), Some(m), Some(l)) = (bands.upper[i], bands.middle[i], bands.lower[i])
            {
                assert!(l <= m && m <= u, "band ordering violated at {i}");
            }
        }
    }

    #[test]
    fn short_series_is_all_none() {
        let bands = bollinger(&[1.0, 2.0], 20, 2.0);
        assert!(bands.upper.iter().all(|v| v.is_none()));
        assert!(bands.middle.iter().all(|v| v.is_none()));
        assert!(bands.lower.iter().all(|v| v.is_none()));
    }
}
