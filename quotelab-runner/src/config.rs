//! Serializable runner configuration.
//!
//! A run is fully described by a TOML file (or the CLI flags that map onto
//! this struct): which symbols, which period, how many workers, and the
//! adapter order plus each adapter's connection settings. Adapters are
//! constructed from this config at run start — there is no ambient client
//! state anywhere in the pipeline.

use quotelab_core::data::{
    AcquisitionChain, EastMoneyAdapter, EastMoneyConfig, Period, QuoteCache, SourceAdapter,
    SourceId, YahooAdapter, YahooConfig,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for one batch run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Symbols to analyze.
    pub symbols: Vec<String>,

    /// History period token (`1mo`, `3mo`, ...). Unrecognized tokens fall
    /// back to `3mo`.
    pub period: String,

    /// Worker pool size for the per-symbol fan-out.
    pub workers: usize,

    /// Real sources in priority order. The synthetic generator is always the
    /// terminal fallback and does not need to be listed.
    pub sources: Vec<SourceId>,

    pub yahoo: YahooConfig,
    pub east_money: EastMoneyConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            period: "3mo".to_string(),
            workers: 4,
            sources: vec![SourceId::YahooFinance, SourceId::EastMoney],
            yahoo: YahooConfig::default(),
            east_money: EastMoneyConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Load a config from a TOML file.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn period(&self) -> Period {
        Period::parse_or_default(&self.period)
    }

    /// Construct the acquisition chain this config describes, sharing the
    /// given response cache across whatever workers end up using the chain.
    pub fn build_chain(&self, cache: Arc<QuoteCache>) -> AcquisitionChain {
        let adapters: Vec<Box<dyn SourceAdapter>> = self
            .sources
            .iter()
            .filter_map(|source| -> Option<Box<dyn SourceAdapter>> {
                match source {
                    SourceId::YahooFinance => {
                        Some(Box::new(YahooAdapter::new(self.yahoo.clone())))
                    }
                    SourceId::EastMoney => {
                        Some(Box::new(EastMoneyAdapter::new(self.east_money.clone())))
                    }
                    // Always appended by the chain itself.
                    SourceId::Synthetic => None,
                }
            })
            .collect();

        AcquisitionChain::with_cache(adapters, cache)
    }
}
