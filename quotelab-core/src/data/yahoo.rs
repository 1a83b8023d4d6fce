//! Yahoo Finance source adapter (international markets).
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API. Yahoo has no official
//! API and is subject to unannounced format changes, which is exactly why the
//! acquisition chain keeps a domestic and a synthetic fallback behind it.
//!
//! When a bare symbol yields no data, the adapter probes the `.SI` and `.HK`
//! exchange suffixes before giving up; suffix probing is this adapter's
//! market convention and stays out of the chain.

use super::source::{Period, SourceAdapter, SourceError, SourceId};
use crate::domain::{Bar, BarSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

/// Exchange suffixes tried when the bare symbol is unknown to Yahoo.
const PROBE_SUFFIXES: &[&str] = &[".SI", ".HK"];

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Configuration for the Yahoo adapter, passed at construction — no ambient
/// process state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Yahoo Finance adapter.
pub struct YahooAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooAdapter {
    pub fn new(config: YahooConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url,
        }
    }

    /// Build the chart API URL for a symbol and date range.
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        let end_ts = end
            .and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        format!(
            "{}/v8/finance/chart/{symbol}?period1={start_ts}&period2={end_ts}&interval=1d",
            self.base_url
        )
    }

    /// Parse the chart API response into bars. Bars with all-None OHLCV
    /// (holidays, non-trading days) are skipped; everything else passes
    /// through unmodified.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<Bar>, SourceError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    SourceError::EmptyResponse {
                        symbol: symbol.to_string(),
                    }
                } else {
                    SourceError::MalformedResponse(format!("{}: {}", err.code, err.description))
                }
            } else {
                SourceError::MalformedResponse("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::MalformedResponse("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| SourceError::MalformedResponse("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::MalformedResponse("no quote data".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    SourceError::MalformedResponse(format!("invalid timestamp: {ts}"))
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            bars.push(Bar {
                date,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
                volume: volume.unwrap_or(0),
            });
        }

        if bars.is_empty() {
            return Err(SourceError::EmptyResponse {
                symbol: symbol.to_string(),
            });
        }

        Ok(bars)
    }

    /// Single fetch attempt against one concrete symbol form.
    fn fetch_one(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, SourceError> {
        let (start, end) = period.date_range();
        let url = self.chart_url(symbol, start, end);

        let resp = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                SourceError::Network(e.to_string())
            } else {
                SourceError::Network(format!("request failed: {e}"))
            }
        })?;

        let status = resp.status();
        if status.as_u16() == 404 {
            // Yahoo reports unknown symbols as a 404 carrying the usual
            // error body. Parse it so "Not Found" becomes EmptyResponse and
            // the caller can probe suffixed forms.
            return match resp.json::<ChartResponse>() {
                Ok(chart) => Self::parse_response(symbol, chart),
                Err(_) => Err(SourceError::EmptyResponse {
                    symbol: symbol.to_string(),
                }),
            };
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                code: status.as_u16(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            SourceError::MalformedResponse(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, chart)
    }
}

impl SourceAdapter for YahooAdapter {
    fn id(&self) -> SourceId {
        SourceId::YahooFinance
    }

    fn fetch(&self, symbol: &str, period: Period) -> Result<BarSeries, SourceError> {
        match self.fetch_one(symbol, period) {
            Ok(bars) => Ok(BarSeries::from_bars(bars)),
            Err(SourceError::EmptyResponse { .. }) if !symbol.contains('.') => {
                // Bare symbol unknown — probe common exchange suffixes.
                for suffix in PROBE_SUFFIXES {
                    let probed = format!("{symbol}{suffix}");
                    tracing::debug!(symbol = %probed, "probing suffixed symbol");
                    if let Ok(bars) = self.fetch_one(&probed, period) {
                        return Ok(BarSeries::from_bars(bars));
                    }
                }
                Err(SourceError::EmptyResponse {
                    symbol: symbol.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}
