//! Canonical in-memory representation of one daily price observation.
//!
//! Every loader and [`DataProvider`](crate::providers::DataProvider) produces
//! this shape, regardless of where the numbers came from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily OHLCV observation for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The symbol this observation belongs to (e.g. "GOOGL").
    pub symbol: String,

    /// Trading day. No time-of-day component.
    pub date: NaiveDate,

    /// Opening price. Some datasets leave it blank on a few days.
    pub open: Option<f64>,

    /// Highest price during the day, when known.
    pub high: Option<f64>,

    /// Lowest price during the day, when known.
    pub low: Option<f64>,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the day.
    pub volume: u64,
}
