//! Serde model of the chart endpoint's JSON body.

use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use crate::{
    models::{record::Record, selection::DateWindow, series::Series},
    providers::ProviderError,
};

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartResponse,
}

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: Option<Meta>,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-oriented quotes; `null` marks a missing observation.
#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl ChartEnvelope {
    /// Converts the body into a series for `symbol`, keeping rows with a close
    /// dated inside `window`.
    pub fn into_series(self, symbol: &str, window: DateWindow) -> Result<Series, ProviderError> {
        if let Some(err) = self.chart.error {
            return Err(ProviderError::Api(format!("{}: {}", err.code, err.description)));
        }
        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::Empty {
                symbol: symbol.to_string(),
            })?;

        let offset = result.meta.map(|m| m.gmtoffset).unwrap_or(0);
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let mut skipped = 0usize;
        let mut records = Vec::with_capacity(result.timestamp.len());
        for (i, &ts) in result.timestamp.iter().enumerate() {
            let at = |column: &[Option<f64>]| column.get(i).copied().flatten();
            let (Some(when), Some(close)) =
                (DateTime::from_timestamp(ts + offset, 0), at(&quote.close))
            else {
                skipped += 1;
                continue;
            };

            let date = when.date_naive();
            if !window.contains(date) {
                continue;
            }
            records.push(Record {
                symbol: symbol.to_string(),
                date,
                open: at(&quote.open),
                high: at(&quote.high),
                low: at(&quote.low),
                close,
                volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
            });
        }
        if skipped > 0 {
            debug!(symbol, skipped, "Dropped incomplete rows from chart response");
        }

        Series::from_unsorted(symbol, records)
            .map(|(series, _)| series)
            .map_err(|e| ProviderError::Internal(e.to_string()))
    }
}
