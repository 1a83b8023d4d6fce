//! Acquisition chain — ordered adapter fallback with a synthetic terminus.
//!
//! Tries each configured adapter in priority order; a failed fetch is logged
//! and the chain advances. The synthetic generator sits structurally at the
//! end and cannot fail, so `acquire` has no error case: the chain trades
//! accuracy for availability and always terminates with a non-empty series.

use super::cache::QuoteCache;
use super::source::{Period, SourceAdapter, SourceId};
use super::synthetic::SyntheticAdapter;
use crate::domain::BarSeries;
use std::sync::Arc;

/// Result of an acquisition: the series and which source produced it.
#[derive(Debug, Clone)]
pub struct Acquired {
    pub series: BarSeries,
    pub source: SourceId,
}

/// Ordered fallback chain over source adapters.
pub struct AcquisitionChain {
    adapters: Vec<Box<dyn SourceAdapter>>,
    synthetic: SyntheticAdapter,
    cache: Arc<QuoteCache>,
}

impl AcquisitionChain {
    /// Chain over the given adapters, in priority order, with a fresh cache.
    pub fn new(adapters: Vec<Box<dyn SourceAdapter>>) -> Self {
        Self::with_cache(adapters, Arc::new(QuoteCache::new()))
    }

    /// Chain sharing an existing cache (one cache per run, many workers).
    pub fn with_cache(adapters: Vec<Box<dyn SourceAdapter>>, cache: Arc<QuoteCache>) -> Self {
        Self {
            adapters,
            synthetic: SyntheticAdapter::new(),
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<QuoteCache> {
        &self.cache
    }

    /// Acquire a non-empty series for a symbol. Infallible: every adapter
    /// failure falls through, ultimately to the synthetic generator.
    ///
    /// Symbol translation and suffix probing are adapter concerns; the chain
    /// only sequences adapters and caches their successes.
    pub fn acquire(&self, symbol: &str, period: Period) -> Acquired {
        for adapter in &self.adapters {
            let source = adapter.id();

            if let Some(cached) = self.cache.get(symbol, period, source) {
                tracing::debug!(%symbol, %period, %source, "cache hit");
                return Acquired {
                    series: (*cached).clone(),
                    source,
                };
            }

            match adapter.fetch(symbol, period) {
                Ok(series) if !series.is_empty() => {
                    tracing::info!(%symbol, %period, %source, bars = series.len(), "fetched");
                    self.cache.insert(symbol, period, source, series.clone());
                    return Acquired { series, source };
                }
                Ok(_) => {
                    // Adapters must not return empty successes; treat as a miss.
                    tracing::warn!(%symbol, %period, %source, "adapter returned empty series");
                }
                Err(e) => {
                    tracing::warn!(%symbol, %period, %source, error = %e, "source unavailable, falling back");
                }
            }
        }

        if let Some(cached) = self.cache.get(symbol, period, SourceId::Synthetic) {
            return Acquired {
                series: (*cached).clone(),
                source: SourceId::Synthetic,
            };
        }

        tracing::warn!(%symbol, %period, "all real sources failed, generating synthetic series");
        let series = self.synthetic.generate(symbol, period);
        self.cache
            .insert(symbol, period, SourceId::Synthetic, series.clone());
        Acquired {
            series,
            source: SourceId::Synthetic,
        }
    }
}
