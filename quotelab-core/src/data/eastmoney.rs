//! East Money source adapter (domestic A-share market).
//!
//! Fetches daily kline history from East Money's push2his API, the same
//! endpoint the akshare ecosystem wraps. A-share symbols are bare six-digit
//! codes; the exchange is encoded by a `secid` prefix derived from the
//! leading digit (6 = Shanghai, 0/3 = Shenzhen).

use super::source::{Period, SourceAdapter, SourceError, SourceId};
use crate::domain::{Bar, BarSeries};
use serde::Deserialize;
use std::time::Duration;

/// push2his kline response envelope.
#[derive(Debug, Deserialize)]
struct KlineResponse {
    data: Option<KlineData>,
}

#[derive(Debug, Deserialize)]
struct KlineData {
    klines: Option<Vec<String>>,
}

/// Configuration for the East Money adapter, passed at construction.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EastMoneyConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for EastMoneyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://push2his.eastmoney.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// East Money A-share adapter.
pub struct EastMoneyAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

/// Map a bare A-share code to an exchange-qualified secid.
///
/// Codes beginning `6` trade on the Shanghai exchange (`1.` prefix); codes
/// beginning `0` or `3` on the Shenzhen exchange (`0.` prefix). Anything
/// else is not addressable through this market.
pub fn secid_for(symbol: &str) -> Result<String, SourceError> {
    let valid_code = symbol.len() == 6 && symbol.chars().all(|c| c.is_ascii_digit());
    if !valid_code {
        return Err(SourceError::InvalidSymbol {
            symbol: symbol.to_string(),
        });
    }
    match symbol.as_bytes()[0] {
        b'6' => Ok(format!("1.{symbol}")),
        b'0' | b'3' => Ok(format!("0.{symbol}")),
        _ => Err(SourceError::InvalidSymbol {
            symbol: symbol.to_string(),
        }),
    }
}

impl EastMoneyAdapter {
    pub fn new(config: EastMoneyConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url,
        }
    }

    /// Build the daily kline URL for a secid and period.
    fn kline_url(&self, secid: &str, period: Period) -> String {
        let (start, end) = period.date_range();
        format!(
            "{}/api/qt/stock/kline/get?secid={secid}\
             &fields1=f1,f2,f3,f4,f5,f6\
             &fields2=f51,f52,f53,f54,f55,f56\
             &klt=101&fqt=0&beg={}&end={}",
            self.base_url,
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
        )
    }

    /// Parse one kline row: `date,open,close,high,low,volume`.
    fn parse_kline(row: &str) -> Result<Bar, SourceError> {
        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() < 6 {
            return Err(SourceError::MalformedResponse(format!(
                "kline row has {} fields: {row}",
                fields.len()
            )));
        }

        let date = chrono::NaiveDate::parse_from_str(fields[0], "%Y-%m-%d")
            .map_err(|e| SourceError::MalformedResponse(format!("bad kline date: {e}")))?;
        let parse_f64 = |s: &str| {
            s.parse::<f64>()
                .map_err(|e| SourceError::MalformedResponse(format!("bad kline value '{s}': {e}")))
        };

        Ok(Bar {
            date,
            open: parse_f64(fields[1])?,
            close: parse_f64(fields[2])?,
            high: parse_f64(fields[3])?,
            low: parse_f64(fields[4])?,
            volume: fields[5]
                .parse::<f64>()
                .map(|v| v.max(0.0) as u64)
                .map_err(|e| {
                    SourceError::MalformedResponse(format!("bad kline volume '{}': {e}", fields[5]))
                })?,
        })
    }
}

impl SourceAdapter for EastMoneyAdapter {
    fn id(&self) -> SourceId {
        SourceId::EastMoney
    }

    fn fetch(&self, symbol: &str, period: Period) -> Result<BarSeries, SourceError> {
        let secid = secid_for(symbol)?;
        let url = self.kline_url(&secid, period);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                code: status.as_u16(),
            });
        }

        let kline: KlineResponse = resp.json().map_err(|e| {
            SourceError::MalformedResponse(format!("failed to parse response for {symbol}: {e}"))
        })?;

        let rows = kline
            .data
            .and_then(|d| d.klines)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SourceError::EmptyResponse {
                symbol: symbol.to_string(),
            })?;

        let bars = rows
            .iter()
            .map(|row| Self::parse_kline(row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BarSeries::from_bars(bars))
    }
}
