//! Summary report — the flat per-symbol record handed to rendering and
//! templating collaborators.

use crate::data::SourceId;
use crate::domain::BarSeries;
use crate::indicators::IndicatorSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One analysis run's summary for a single symbol. Immutable once built.
///
/// Indicator fields carry the latest value of each series; `None` means the
/// series was shorter than that indicator's warm-up window, and it is passed
/// through as-is — never coerced to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub symbol: String,
    pub source: SourceId,
    pub latest_date: NaiveDate,
    pub latest_close: f64,
    pub change: f64,
    pub change_pct: f64,
    pub latest_volume: u64,
    pub bar_count: usize,
    pub generated_at: chrono::NaiveDateTime,

    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub volume_ma20: Option<f64>,
}

impl SummaryReport {
    /// Build the summary from a non-empty series and its indicator set.
    ///
    /// The acquisition chain guarantees the series is non-empty; passing an
    /// empty one is a caller bug and panics on the latest-bar access.
    ///
    /// Change vs. the previous bar: with exactly one bar there is no previous
    /// bar, and both `change` and `change_pct` are reported as zero by
    /// convention — the previous close is taken to equal the current one.
    pub fn build(
        series: &BarSeries,
        indicators: &IndicatorSet,
        symbol: &str,
        source: SourceId,
    ) -> Self {
        let bars = series.bars();
        let latest = &bars[bars.len() - 1];
        let prev_close = if bars.len() > 1 {
            bars[bars.len() - 2].close
        } else {
            latest.close
        };

        let change = latest.close - prev_close;
        let change_pct = if prev_close != 0.0 {
            change / prev_close * 100.0
        } else {
            0.0
        };

        let last = bars.len() - 1;
        Self {
            symbol: symbol.to_string(),
            source,
            latest_date: latest.date,
            latest_close: latest.close,
            change,
            change_pct,
            latest_volume: latest.volume,
            bar_count: bars.len(),
            generated_at: chrono::Local::now().naive_local(),
            ma5: indicators.ma5[last],
            ma10: indicators.ma10[last],
            ma20: indicators.ma20[last],
            rsi14: indicators.rsi14[last],
            macd: indicators.macd[last],
            macd_signal: indicators.macd_signal[last],
            macd_hist: indicators.macd_hist[last],
            bb_upper: indicators.bb_upper[last],
            bb_middle: indicators.bb_middle[last],
            bb_lower: indicators.bb_lower[last],
            volume_ma20: indicators.volume_ma20[last],
        }
    }
}
