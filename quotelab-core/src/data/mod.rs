//! Data acquisition: source adapters, fallback chain, and response cache.

pub mod cache;
pub mod chain;
pub mod eastmoney;
pub mod source;
pub mod synthetic;
pub mod yahoo;

pub use cache::QuoteCache;
pub use chain::{Acquired, AcquisitionChain};
pub use eastmoney::{EastMoneyAdapter, EastMoneyConfig};
pub use source::{Period, SourceAdapter, SourceError, SourceId};
pub use synthetic::SyntheticAdapter;
pub use yahoo::{YahooAdapter, YahooConfig};
