//! Source adapter trait and structured error types.
//!
//! The SourceAdapter trait abstracts over upstream quote providers (Yahoo
//! Finance, East Money, the synthetic generator) so the acquisition chain can
//! try them in order and tests can substitute mocks.

use crate::domain::BarSeries;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse history window requested by the caller.
///
/// Each adapter translates a period into its own concrete date range
/// (end = today, start = today minus the period's calendar-day offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
}

impl Period {
    /// Parse a period token. Unrecognized tokens fall back to `3mo`.
    pub fn parse_or_default(token: &str) -> Self {
        match token {
            "1d" => Period::OneDay,
            "5d" => Period::FiveDays,
            "1mo" => Period::OneMonth,
            "3mo" => Period::ThreeMonths,
            "6mo" => Period::SixMonths,
            "1y" => Period::OneYear,
            "2y" => Period::TwoYears,
            _ => Period::ThreeMonths,
        }
    }

    /// Calendar-day offset used to derive a concrete date range.
    pub fn days(self) -> i64 {
        match self {
            Period::OneDay => 1,
            Period::FiveDays => 5,
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::OneYear => 365,
            Period::TwoYears => 730,
        }
    }

    /// Approximate number of trading days in the period; the synthetic
    /// adapter produces a series of this length.
    pub fn bar_count(self) -> usize {
        match self {
            Period::OneDay => 1,
            Period::FiveDays => 5,
            Period::OneMonth => 21,
            Period::ThreeMonths => 63,
            Period::SixMonths => 126,
            Period::OneYear => 252,
            Period::TwoYears => 504,
        }
    }

    /// Concrete `[start, end]` date range for this period, ending today.
    pub fn date_range(self) -> (NaiveDate, NaiveDate) {
        let end = Utc::now().date_naive();
        (end - Duration::days(self.days()), end)
    }

    /// Canonical token form.
    pub fn token(self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Where a bar series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    YahooFinance,
    EastMoney,
    Synthetic,
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceId::YahooFinance => "yahoo_finance",
            SourceId::EastMoney => "east_money",
            SourceId::Synthetic => "synthetic",
        };
        f.write_str(s)
    }
}

/// Why an upstream fetch produced no usable series.
///
/// Every variant is recoverable from the acquisition chain's point of view:
/// the chain logs it and advances to the next adapter.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("upstream returned no data for '{symbol}'")]
    EmptyResponse { symbol: String },

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("cannot translate symbol '{symbol}' for this market")]
    InvalidSymbol { symbol: String },

    #[error("upstream returned HTTP {code}")]
    Status { code: u16 },
}

/// Trait for upstream quote providers.
///
/// Implementations own their market's symbol-translation convention and
/// translate the coarse `Period` into whatever their wire protocol wants.
/// An empty upstream response is an error, never an empty-success series.
pub trait SourceAdapter: Send + Sync {
    /// Stable identifier for this source, used in reports and cache keys.
    fn id(&self) -> SourceId;

    /// Fetch daily OHLCV history for a symbol over the given period.
    fn fetch(&self, symbol: &str, period: Period) -> Result<BarSeries, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_tokens_roundtrip() {
        for p in [
            Period::OneDay,
            Period::FiveDays,
            Period::OneMonth,
            Period::ThreeMonths,
            Period::SixMonths,
            Period::OneYear,
            Period::TwoYears,
        ] {
            assert_eq!(Period::parse_or_default(p.token()), p);
        }
    }

    #[test]
    fn unknown_period_defaults_to_3mo() {
        assert_eq!(Period::parse_or_default("14mo"), Period::ThreeMonths);
        assert_eq!(Period::parse_or_default(""), Period::ThreeMonths);
    }

    #[test]
    fn date_range_spans_period_days() {
        let (start, end) = Period::OneYear.date_range();
        assert_eq!((end - start).num_days(), 365);
    }

    #[test]
    fn source_id_display_is_stable() {
        assert_eq!(SourceId::YahooFinance.to_string(), "yahoo_finance");
        assert_eq!(SourceId::EastMoney.to_string(), "east_money");
        assert_eq!(SourceId::Synthetic.to_string(), "synthetic");
    }
}
