//! Batch orchestration — fan the symbol list out over a bounded worker pool.
//!
//! Each symbol's acquisition and computation is independent: a worker owns
//! its series and indicator set exclusively, so there is nothing to lock on
//! the data path. The only shared state is the read-mostly response cache
//! inside the chain. A failed symbol is recorded with its reason and the
//! batch carries on; one bad symbol never aborts the run.

use crate::config::RunnerConfig;
use quotelab_core::data::{AcquisitionChain, Period, QuoteCache, SourceId};
use quotelab_core::domain::BarSeries;
use quotelab_core::indicators::IndicatorSet;
use quotelab_core::report::SummaryReport;
use rayon::prelude::*;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Everything produced for one symbol, handed by value to rendering and
/// templating collaborators.
#[derive(Debug, Clone)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub source: SourceId,
    pub series: BarSeries,
    pub indicators: IndicatorSet,
    pub report: SummaryReport,
}

/// A symbol that could not be analyzed, with a user-facing reason.
#[derive(Debug, Clone)]
pub struct SymbolFailure {
    pub symbol: String,
    pub reason: String,
}

/// Result of a batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    pub analyses: Vec<SymbolAnalysis>,
    pub failures: Vec<SymbolFailure>,
}

impl BatchOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Analyze one symbol end to end: acquire → indicators → report.
pub fn analyze_symbol(
    chain: &AcquisitionChain,
    symbol: &str,
    period: Period,
) -> Result<SymbolAnalysis, SymbolFailure> {
    let acquired = chain.acquire(symbol, period);

    let indicators = IndicatorSet::compute(&acquired.series).map_err(|e| SymbolFailure {
        symbol: symbol.to_string(),
        reason: e.to_string(),
    })?;

    let report = SummaryReport::build(&acquired.series, &indicators, symbol, acquired.source);

    Ok(SymbolAnalysis {
        symbol: symbol.to_string(),
        source: acquired.source,
        series: acquired.series,
        indicators,
        report,
    })
}

/// Run the batch described by a config: build the chain, then fan out.
pub fn run_batch(config: &RunnerConfig) -> Result<BatchOutcome, BatchError> {
    let cache = Arc::new(QuoteCache::new());
    let chain = config.build_chain(cache);
    run_batch_with_chain(&chain, &config.symbols, config.period(), config.workers)
}

/// Run a batch over an existing chain (exposed so tests can inject mocks).
pub fn run_batch_with_chain(
    chain: &AcquisitionChain,
    symbols: &[String],
    period: Period,
    workers: usize,
) -> Result<BatchOutcome, BatchError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .map_err(|e| BatchError::WorkerPool(e.to_string()))?;

    let results: Vec<Result<SymbolAnalysis, SymbolFailure>> = pool.install(|| {
        symbols
            .par_iter()
            .map(|symbol| analyze_symbol(chain, symbol, period))
            .collect()
    });

    let mut analyses = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(analysis) => analyses.push(analysis),
            Err(failure) => {
                tracing::warn!(symbol = %failure.symbol, reason = %failure.reason, "symbol skipped");
                failures.push(failure);
            }
        }
    }

    Ok(BatchOutcome { analyses, failures })
}
