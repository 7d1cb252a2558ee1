use serde::{Deserialize, Serialize};

use crate::models::selection::DateWindow;

/// Vendor-agnostic parameters for requesting one symbol's daily history.
///
/// It is the standard input for every
/// [`DataProvider`](crate::providers::DataProvider) implementation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// Symbol to request, exactly as the user entered it (e.g. `"AAPL"`).
    pub symbol: String,

    /// Inclusive calendar window. Providers whose upstream API uses an
    /// exclusive end translate it themselves.
    pub window: DateWindow,
}

impl SeriesRequest {
    pub fn new(symbol: impl Into<String>, window: DateWindow) -> Self {
        Self {
            symbol: symbol.into(),
            window,
        }
    }
}
