//! QuoteLab Runner — batch orchestration over the core pipeline.

pub mod batch;
pub mod config;

pub use batch::{
    analyze_symbol, run_batch, run_batch_with_chain, BatchError, BatchOutcome, SymbolAnalysis,
    SymbolFailure,
};
pub use config::{ConfigError, RunnerConfig};
