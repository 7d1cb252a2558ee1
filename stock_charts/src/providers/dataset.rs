use std::path::Path;

use async_trait::async_trait;

use crate::{
    errors::StoreError,
    filter::filter_window,
    models::{request::SeriesRequest, series::Series},
    providers::{DataProvider, ProviderError},
    store::{self, SeriesStore},
};

/// Serves series out of an already loaded [`SeriesStore`].
///
/// Lookups are exact-match; an unknown symbol yields an empty series.
#[derive(Debug, Clone)]
pub struct DatasetProvider {
    store: SeriesStore,
}

impl DatasetProvider {
    pub fn new(store: SeriesStore) -> Self {
        Self { store }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let (store, _report) = store::load_path(path)?;
        Ok(Self::new(store))
    }
}

#[async_trait]
impl DataProvider for DatasetProvider {
    async fn fetch_series(&self, params: SeriesRequest) -> Result<Series, ProviderError> {
        Ok(filter_window(&self.store, &params.symbol, params.window))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::selection::DateWindow;

    const CSV: &str = "\
date,open,high,low,close,volume,Name
2016-01-04,10,11,9,10.5,100,ABC
2016-01-05,10,11,9,10.7,100,ABC
2016-01-06,10,11,9,10.9,100,ABC
";

    fn window(a: u32, b: u32) -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2016, 1, a).unwrap(),
            NaiveDate::from_ymd_opt(2016, 1, b).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn serves_the_requested_window() {
        let (store, _) = store::load(CSV.as_bytes()).unwrap();
        let provider = DatasetProvider::new(store);

        let series = provider
            .fetch_series(SeriesRequest::new("ABC", window(5, 6)))
            .await
            .unwrap();
        assert_eq!(series.len(), 2);

        let missing = provider
            .fetch_series(SeriesRequest::new("abc", window(1, 31)))
            .await
            .unwrap();
        assert!(missing.is_empty());
    }
}
