//! Process-wide response cache.
//!
//! Keyed by `(symbol, period, source)`, shared read-mostly across workers so
//! one run never hits the same upstream twice for the same request. Writes
//! take the lock briefly on insert; reads clone the series out so workers
//! keep exclusive ownership of what they compute on.

use super::source::{Period, SourceId};
use crate::domain::BarSeries;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    symbol: String,
    period: Period,
    source: SourceId,
}

/// In-memory quote cache for a single run.
#[derive(Debug, Default)]
pub struct QuoteCache {
    inner: RwLock<HashMap<CacheKey, Arc<BarSeries>>>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &str, period: Period, source: SourceId) -> Option<Arc<BarSeries>> {
        let key = CacheKey {
            symbol: symbol.to_string(),
            period,
            source,
        };
        self.inner.read().ok()?.get(&key).cloned()
    }

    pub fn insert(&self, symbol: &str, period: Period, source: SourceId, series: BarSeries) {
        let key = CacheKey {
            symbol: symbol.to_string(),
            period,
            source,
        };
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, Arc::new(series));
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use chrono::NaiveDate;

    fn one_bar_series() -> BarSeries {
        BarSeries::from_bars(vec![Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 1,
        }])
    }

    #[test]
    fn miss_then_hit() {
        let cache = QuoteCache::new();
        assert!(cache
            .get("AAPL", Period::OneMonth, SourceId::YahooFinance)
            .is_none());

        cache.insert(
            "AAPL",
            Period::OneMonth,
            SourceId::YahooFinance,
            one_bar_series(),
        );
        let hit = cache
            .get("AAPL", Period::OneMonth, SourceId::YahooFinance)
            .unwrap();
        assert_eq!(hit.len(), 1);
    }

    #[test]
    fn key_includes_period_and_source() {
        let cache = QuoteCache::new();
        cache.insert(
            "AAPL",
            Period::OneMonth,
            SourceId::YahooFinance,
            one_bar_series(),
        );
        assert!(cache
            .get("AAPL", Period::OneYear, SourceId::YahooFinance)
            .is_none());
        assert!(cache
            .get("AAPL", Period::OneMonth, SourceId::Synthetic)
            .is_none());
    }
}
