use chrono::{NaiveDate, NaiveTime};

use crate::{models::request::SeriesRequest, providers::ProviderError};

/// Builds the query string for a daily chart request.
///
/// `period2` is exclusive upstream, so it is set to midnight UTC of the day
/// after the requested end.
pub fn construct_params(params: &SeriesRequest) -> Result<Vec<(String, String)>, ProviderError> {
    let end = params.window.end().succ_opt().ok_or_else(|| {
        ProviderError::Validation(format!("End date {} is out of range", params.window.end()))
    })?;

    Ok(vec![
        (
            "period1".to_string(),
            midnight_utc(params.window.start()).to_string(),
        ),
        ("period2".to_string(), midnight_utc(end).to_string()),
        ("interval".to_string(), "1d".to_string()),
        ("events".to_string(), "history".to_string()),
    ])
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Checks that `symbol` can be placed in the request path as-is.
pub fn validate_symbol(symbol: &str) -> Result<(), ProviderError> {
    if symbol.is_empty() {
        return Err(ProviderError::Validation("Symbol is empty".to_string()));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=');
    if !symbol.chars().all(allowed) {
        return Err(ProviderError::Validation(format!(
            "Symbol '{symbol}' contains unsupported characters"
        )));
    }
    Ok(())
}
