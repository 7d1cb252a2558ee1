use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, header::HeaderValue};
use tracing::debug;

use crate::{
    config::ProviderConfig,
    models::{request::SeriesRequest, series::Series},
    providers::{
        DataProvider, ProviderError, ProviderInitError,
        yahoo::{
            params::{construct_params, validate_symbol},
            response::ChartEnvelope,
        },
    },
};

pub const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Live daily history from Yahoo Finance.
///
/// Requests are throttled client-side and bounded by an HTTP timeout.
pub struct YahooProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
}

impl YahooProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderInitError> {
        let rate = NonZeroU32::new(config.requests_per_second).ok_or(ProviderInitError::ZeroRate)?;
        let quota = Quota::per_second(rate).allow_burst(nonzero!(1u32));

        let client = Client::builder()
            .user_agent(HeaderValue::from_str(&config.user_agent)?)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::direct(quota),
        })
    }
}

#[async_trait]
impl DataProvider for YahooProvider {
    async fn fetch_series(&self, params: SeriesRequest) -> Result<Series, ProviderError> {
        validate_symbol(&params.symbol)?;
        let query = construct_params(&params)?;
        let url = format!("{}/{}", self.base_url, params.symbol);

        self.limiter.until_ready().await;
        debug!(%url, symbol = %params.symbol, "Requesting chart");
        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            // Unknown symbols come back as 404 with a regular chart body.
            let detail = serde_json::from_str::<ChartEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.chart.error)
                .map(|err| format!("{}: {}", err.code, err.description))
                .unwrap_or(body);
            return Err(ProviderError::Api(format!("HTTP {status}: {detail}")));
        }

        let envelope = response.json::<ChartEnvelope>().await?;
        envelope.into_series(&params.symbol, params.window)
    }
}
