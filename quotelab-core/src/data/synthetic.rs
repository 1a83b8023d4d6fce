//! Synthetic source adapter — the terminal fallback that never fails.
//!
//! Produces a deterministic pseudo-random walk: log-returns drawn from a
//! zero-mean normal distribution, compounded multiplicatively from a random
//! base price. The RNG is seeded from a BLAKE3 hash of the symbol, so the
//! same symbol always yields the same series regardless of run order.
//!
//! Synthetic data is a placeholder, not market data; reports built on it are
//! tagged with the synthetic source id.

use super::source::{Period, SourceAdapter, SourceError, SourceId};
use crate::domain::{Bar, BarSeries};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Daily log-return volatility of the synthetic walk.
const DAILY_SIGMA: f64 = 0.02;

/// Synthetic quote generator.
#[derive(Debug, Default)]
pub struct SyntheticAdapter;

impl SyntheticAdapter {
    pub fn new() -> Self {
        Self
    }

    /// The last `n` weekdays ending today, ascending.
    fn trading_dates(n: usize) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(n);
        let mut current = Utc::now().date_naive();
        while dates.len() < n {
            if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                dates.push(current);
            }
            current -= Duration::days(1);
        }
        dates.reverse();
        dates
    }

    /// Generate the walk for a symbol. Infallible and deterministic per symbol.
    pub fn generate(&self, symbol: &str, period: Period) -> BarSeries {
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let returns = Normal::new(0.0, DAILY_SIGMA).expect("valid normal parameters");
        let intrabar: Normal<f64> = Normal::new(0.0, 0.015).expect("valid normal parameters");

        let dates = Self::trading_dates(period.bar_count());
        let mut bars = Vec::with_capacity(dates.len());
        let mut price: f64 = 100.0 + rng.gen_range(0.0..50.0);

        for date in dates {
            let open = price;
            price *= f64::exp(returns.sample(&mut rng));
            let close = price;
            let high = open.max(close) * (1.0 + intrabar.sample(&mut rng).abs());
            let low = open.min(close) * (1.0 - intrabar.sample(&mut rng).abs());
            let volume = rng.gen_range(1_000_000..10_000_000u64);

            bars.push(Bar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        BarSeries::from_bars(bars)
    }
}

impl SourceAdapter for SyntheticAdapter {
    fn id(&self) -> SourceId {
        SourceId::Synthetic
    }

    /// Never returns `Err`; the `Result` exists only to satisfy the trait.
    fn fetch(&self, symbol: &str, period: Period) -> Result<BarSeries, SourceError> {
        Ok(self.generate(symbol, period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        let series = SyntheticAdapter::new().generate("XYZ", Period::ThreeMonths);
        assert_eq!(series.len(), 63);
    }

    #[test]
    fn deterministic_per_symbol() {
        let adapter = SyntheticAdapter::new();
        let a = adapter.generate("XYZ", Period::OneMonth);
        let b = adapter.generate("XYZ", Period::OneMonth);
        assert_eq!(a.closes(), b.closes());

        let c = adapter.generate("ABC", Period::OneMonth);
        assert_ne!(a.closes(), c.closes());
    }

    #[test]
    fn bars_are_sane_and_positive() {
        let series = SyntheticAdapter::new().generate("SANE", Period::SixMonths);
        for bar in series.bars() {
            assert!(bar.is_sane(), "insane synthetic bar: {bar:?}");
        }
    }

    #[test]
    fn skips_weekends() {
        let series = SyntheticAdapter::new().generate("WK", Period::OneYear);
        for bar in series.bars() {
            assert!(!matches!(
                bar.date.weekday(),
                Weekday::Sat | Weekday::Sun
            ));
        }
    }

    #[test]
    fn fetch_never_fails() {
        let adapter = SyntheticAdapter::new();
        assert!(adapter.fetch("", Period::OneDay).is_ok());
        assert!(adapter.fetch("!!not-a-symbol!!", Period::TwoYears).is_ok());
    }
}
