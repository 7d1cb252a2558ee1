use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::record::Record;

/// A numeric column of a [`Record`] that can be charted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Field {
    /// Reads this field from `record`.
    ///
    /// Volume is widened to `f64`. A missing open, high or low reads as NaN,
    /// which serializes as a gap (`null`) in the chart.
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Field::Open => record.open.unwrap_or(f64::NAN),
            Field::High => record.high.unwrap_or(f64::NAN),
            Field::Low => record.low.unwrap_or(f64::NAN),
            Field::Close => record.close,
            Field::Volume => record.volume as f64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Open => "open",
            Field::High => "high",
            Field::Low => "low",
            Field::Close => "close",
            Field::Volume => "volume",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
