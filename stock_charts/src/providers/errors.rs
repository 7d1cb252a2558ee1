use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, HTTP timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider's API answered with an error (e.g., unknown symbol).
    #[error("API error: {0}")]
    Api(String),

    /// The provider had no usable data for the symbol and window.
    #[error("No data returned for {symbol}")]
    Empty { symbol: String },

    /// The request parameters were invalid for this specific provider.
    #[error("Invalid parameters for provider: {0}")]
    Validation(String),

    /// An internal error occurred while processing data within the provider.
    #[error("Internal provider error: {0}")]
    Internal(String),
}

/// Errors raised while constructing a provider.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    /// The configured user agent is not a valid header value.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    /// A rate limit of zero requests per second was configured.
    #[error("Rate limit must allow at least one request per second")]
    ZeroRate,
}
