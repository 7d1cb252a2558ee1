//! Provider abstraction for daily price sources.
//!
//! [`DataProvider`] is the single seam through which the comparison front
//! ends obtain data, so tests can swap the live HTTP source for a scripted
//! one.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use stock_charts::models::{request::SeriesRequest, series::Series};
//! use stock_charts::providers::{DataProvider, errors::ProviderError};
//!
//! struct Nothing;
//!
//! #[async_trait]
//! impl DataProvider for Nothing {
//!     async fn fetch_series(&self, params: SeriesRequest) -> Result<Series, ProviderError> {
//!         Ok(Series::empty(params.symbol))
//!     }
//! }
//! ```

pub mod dataset;
pub mod errors;
pub mod yahoo;

use async_trait::async_trait;
use tracing::info;

use crate::{
    config::{AppConfig, ProviderKind},
    errors::Error,
    models::{request::SeriesRequest, series::Series},
};

pub use dataset::DatasetProvider;
pub use errors::{ProviderError, ProviderInitError};
pub use yahoo::YahooProvider;

/// Fetches one symbol's daily history.
///
/// Implementations return records inside `params.window` only. An empty
/// series is a valid answer; callers decide whether that is a failure.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch_series(&self, params: SeriesRequest) -> Result<Series, ProviderError>;
}

#[async_trait]
impl DataProvider for Box<dyn DataProvider> {
    async fn fetch_series(&self, params: SeriesRequest) -> Result<Series, ProviderError> {
        self.as_ref().fetch_series(params).await
    }
}

/// Builds the provider selected by `config.provider.kind`.
pub fn build_provider(config: &AppConfig) -> Result<Box<dyn DataProvider>, Error> {
    match config.provider.kind {
        ProviderKind::Yahoo => {
            info!(base_url = %config.provider.base_url, "Using Yahoo Finance provider");
            Ok(Box::new(YahooProvider::new(&config.provider)?))
        }
        ProviderKind::Dataset => {
            info!(path = %config.dataset.path.display(), "Using dataset provider");
            Ok(Box::new(DatasetProvider::from_path(&config.dataset.path)?))
        }
    }
}
