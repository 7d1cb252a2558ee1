#![allow(dead_code)]

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use stock_charts::{
    models::{record::Record, request::SeriesRequest, series::Series},
    providers::{DataProvider, ProviderError},
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn record(symbol: &str, date: NaiveDate, close: f64) -> Record {
    Record {
        symbol: symbol.to_string(),
        date,
        open: Some(close),
        high: Some(close),
        low: Some(close),
        close,
        volume: 1_000,
    }
}

/// Serves canned closes for a fixed set of symbols, exact match only.
#[derive(Default)]
pub struct ScriptedProvider {
    closes: HashMap<String, Vec<(NaiveDate, f64)>>,
}

impl ScriptedProvider {
    pub fn with(mut self, symbol: &str, closes: &[(NaiveDate, f64)]) -> Self {
        self.closes.insert(symbol.to_string(), closes.to_vec());
        self
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn fetch_series(&self, params: SeriesRequest) -> Result<Series, ProviderError> {
        let records = self
            .closes
            .get(&params.symbol)
            .map(|rows| {
                rows.iter()
                    .filter(|(d, _)| params.window.contains(*d))
                    .map(|&(d, c)| record(&params.symbol, d, c))
                    .collect()
            })
            .unwrap_or_default();
        Series::from_unsorted(params.symbol, records)
            .map(|(series, _)| series)
            .map_err(|e| ProviderError::Internal(e.to_string()))
    }
}

/// Always fails as if the upstream API had rejected the request.
pub struct FailingProvider;

#[async_trait]
impl DataProvider for FailingProvider {
    async fn fetch_series(&self, params: SeriesRequest) -> Result<Series, ProviderError> {
        Err(ProviderError::Api(format!("Not Found: {}", params.symbol)))
    }
}

/// Answers only after `delay`.
pub struct SlowProvider {
    pub delay: Duration,
}

#[async_trait]
impl DataProvider for SlowProvider {
    async fn fetch_series(&self, params: SeriesRequest) -> Result<Series, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(Series::from_unsorted(
            params.symbol.clone(),
            vec![record(&params.symbol, params.window.start(), 1.0)],
        )
        .map_err(|e| ProviderError::Internal(e.to_string()))?
        .0)
    }
}
