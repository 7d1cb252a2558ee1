//! Narrows a store down to one symbol inside one inclusive date window.

use chrono::NaiveDate;

use crate::{
    errors::FilterError,
    models::{selection::DateWindow, series::Series},
    store::SeriesStore,
};

/// Returns the records of `symbol` dated within `[start, end]`.
///
/// The symbol match is exact. An unknown symbol yields an empty series.
pub fn filter(
    store: &SeriesStore,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Series, FilterError> {
    let window = DateWindow::new(start, end)?;
    Ok(filter_window(store, symbol, window))
}

/// [`filter`] for a window that is already known to be ordered.
pub fn filter_window(store: &SeriesStore, symbol: &str, window: DateWindow) -> Series {
    match store.get(symbol) {
        Some(series) => filter_series(series, window),
        None => Series::empty(symbol),
    }
}

/// Applies `window` to a single series, returning an independent copy.
pub fn filter_series(series: &Series, window: DateWindow) -> Series {
    Series::from_sorted(series.symbol().to_string(), series.window(window).to_vec())
}
