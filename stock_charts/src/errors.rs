use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;
use thiserror::Error;

use crate::providers::errors::{ProviderError, ProviderInitError};

/// The unified error type for the `stock_charts` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error raised by the series store (load, add, remove).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A selection window that cannot be applied.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The data provider failed or returned nothing for the requested symbol.
    #[error("Failed to fetch {symbol}: {source}")]
    FetchFailure {
        symbol: String,
        #[source]
        source: ProviderError,
    },

    /// The data provider did not answer within the configured timeout.
    #[error("Fetching {symbol} timed out after {}s", .timeout.as_secs_f64())]
    FetchTimeout { symbol: String, timeout: Duration },

    /// A provider could not be constructed.
    #[error("Provider initialization error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// A generic I/O error (render surfaces, prompts).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading the tabular dataset at startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The dataset file could not be opened.
    #[error("Failed to open dataset {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream itself is malformed (bad quoting, ragged rows, I/O).
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks one or more required columns.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    /// Two identifiers in the dataset differ only by letter case.
    #[error("Identifiers '{first}' and '{second}' differ only by case")]
    ConflictingSymbols { first: String, second: String },

    /// The store refused a loaded series.
    #[error("Failed to store dataset series: {0}")]
    Store(#[source] Box<StoreError>),
}

/// Errors raised by [`SeriesStore`](crate::store::SeriesStore) mutations and loading.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The dataset could not be loaded.
    #[error("Data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    /// The identifier is already present (compared ignoring ASCII case).
    #[error("{symbol} is already tracked (as {existing})")]
    DuplicateEntity { symbol: String, existing: String },

    /// No entity matches the given index or identifier.
    #[error("No tracked entity matches {target}")]
    NotFound { target: String },

    /// A record was handed to a series keyed by another identifier.
    #[error("Record for {found} cannot join series {expected}")]
    SymbolMismatch { expected: String, found: String },
}

/// Errors raised by the filter stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The window start lies after its end.
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// The window does not overlap the loaded data at all.
    #[error("Range {start} to {end} lies outside the data ({first} to {last})")]
    OutOfBounds {
        start: NaiveDate,
        end: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },
}
