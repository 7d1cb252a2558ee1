use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::FilterError;

/// An inclusive calendar window `[start, end]`.
///
/// A `DateWindow` can only be built through [`DateWindow::new`], so
/// `start <= end` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Narrows the window into `bounds`.
    ///
    /// Returns `None` when the two do not overlap at all.
    pub fn clamp_to(&self, bounds: DateWindow) -> Option<DateWindow> {
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        (start <= end).then_some(DateWindow { start, end })
    }
}

impl<'de> Deserialize<'de> for DateWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: NaiveDate,
            end: NaiveDate,
        }

        let raw = Raw::deserialize(deserializer)?;
        DateWindow::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

/// What the dataset dashboard is currently showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub entity: String,
    pub window: DateWindow,
}
