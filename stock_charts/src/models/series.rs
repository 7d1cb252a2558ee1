//! A chronologically ordered run of [`Record`]s for a single symbol.

use crate::{
    errors::StoreError,
    models::{record::Record, selection::DateWindow},
};

/// Represents the complete daily history held for one symbol.
///
/// Records are kept sorted by date with no two records on the same day.
/// The fields are private so that ordering cannot be broken after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    symbol: String,
    records: Vec<Record>,
}

impl Series {
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            records: Vec::new(),
        }
    }

    /// Builds a series from records in any order.
    ///
    /// Records are stably sorted by date; for a repeated date the first
    /// occurrence in input order is kept. Returns the series together with
    /// the number of dropped duplicates.
    pub fn from_unsorted(
        symbol: impl Into<String>,
        mut records: Vec<Record>,
    ) -> Result<(Self, usize), StoreError> {
        let symbol = symbol.into();
        if let Some(stray) = records.iter().find(|r| r.symbol != symbol) {
            return Err(StoreError::SymbolMismatch {
                expected: symbol,
                found: stray.symbol.clone(),
            });
        }

        let dropped = sort_unique_by_date(&mut records);
        Ok((Self { symbol, records }, dropped))
    }

    /// Wraps records that are already sorted and unique by date.
    pub(crate) fn from_sorted(symbol: String, records: Vec<Record>) -> Self {
        debug_assert!(records.windows(2).all(|w| w[0].date < w[1].date));
        Self { symbol, records }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last date of the series, `None` when empty.
    pub fn bounds(&self) -> Option<DateWindow> {
        let first = self.records.first()?.date;
        let last = self.records.last()?.date;
        DateWindow::new(first, last).ok()
    }

    /// The contiguous slice of records inside `window`.
    pub fn window(&self, window: DateWindow) -> &[Record] {
        let lo = self.records.partition_point(|r| r.date < window.start());
        let hi = self.records.partition_point(|r| r.date <= window.end());
        &self.records[lo..hi.max(lo)]
    }
}

/// Stable-sorts by date and drops later records sharing a date.
/// Returns how many were dropped.
pub(crate) fn sort_unique_by_date(records: &mut Vec<Record>) -> usize {
    records.sort_by_key(|r| r.date);
    let before = records.len();
    records.dedup_by_key(|r| r.date);
    before - records.len()
}
