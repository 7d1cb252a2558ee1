//! Tabular CSV loading for the dataset dashboard.

use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDate;
use csv::StringRecord;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::{
    errors::{DataLoadError, StoreError},
    models::{
        record::Record,
        series::{Series, sort_unique_by_date},
    },
    store::SeriesStore,
};

const IDENTIFIER_ALIASES: &[&str] = &["name", "symbol", "ticker", "identifier"];
const DATE_ALIASES: &[&str] = &["date", "timestamp"];

/// Counters collected while loading a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read, excluding the header.
    pub rows_read: usize,
    /// Rows dropped because a cell was empty or unparseable.
    pub rows_skipped: usize,
    /// Rows dropped because their entity already had a row for that date.
    pub duplicates_dropped: usize,
    /// Distinct entities loaded.
    pub entities: usize,
}

/// Column positions resolved from the header row.
struct Columns {
    symbol: usize,
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, DataLoadError> {
        let headers_lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
        let find = |aliases: &[&str]| position(&headers_lower, aliases);

        let symbol = find(IDENTIFIER_ALIASES);
        let date = find(DATE_ALIASES);
        let open = find(&["open"][..]);
        let high = find(&["high"][..]);
        let low = find(&["low"][..]);
        let close = find(&["close"][..]);
        let volume = find(&["volume"][..]);

        match (symbol, date, open, high, low, close, volume) {
            (Some(symbol), Some(date), Some(open), Some(high), Some(low), Some(close), Some(volume)) => {
                Ok(Self {
                    symbol,
                    date,
                    open,
                    high,
                    low,
                    close,
                    volume,
                })
            }
            _ => {
                let missing = [
                    ("identifier", symbol),
                    ("date", date),
                    ("open", open),
                    ("high", high),
                    ("low", low),
                    ("close", close),
                    ("volume", volume),
                ]
                .into_iter()
                .filter_map(|(name, pos)| pos.is_none().then_some(name))
                .collect();
                Err(DataLoadError::MissingColumns(missing))
            }
        }
    }

    fn parse(&self, row: &StringRecord) -> Result<Record, String> {
        let cell = |index: usize, name: &str| {
            row.get(index)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| format!("empty {name}"))
        };
        let price = |index: usize, name: &str| {
            let raw = cell(index, name)?;
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("bad {name} '{raw}'"))
        };

        let symbol = cell(self.symbol, "identifier")?.to_string();
        let raw_date = cell(self.date, "date")?;
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| format!("bad date '{raw_date}'"))?;

        // Blank or malformed open/high/low leave a gap instead of dropping the day.
        let optional = |index: usize, name: &str| price(index, name).ok();

        Ok(Record {
            symbol,
            date,
            open: optional(self.open, "open"),
            high: optional(self.high, "high"),
            low: optional(self.low, "low"),
            close: price(self.close, "close")?,
            volume: parse_volume(cell(self.volume, "volume")?)?,
        })
    }
}

fn position(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| aliases.contains(&h.as_str()))
}

/// Volumes are integral, but some exports write them as `1234.0`.
fn parse_volume(raw: &str) -> Result<u64, String> {
    if let Ok(volume) = raw.parse::<u64>() {
        return Ok(volume);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(format!("bad volume '{raw}'")),
    }
}

/// Reads a CSV dataset into a [`SeriesStore`].
///
/// Headers are matched case-insensitively. Rows with an empty or unparseable
/// identifier, date, close or volume are skipped; a blank open, high or low is
/// kept as missing. For a repeated `(identifier, date)` the first row wins.
/// Entities are stored in first-seen order.
pub fn load<R: Read>(reader: R) -> Result<(SeriesStore, LoadReport), DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::resolve(reader.headers()?)?;

    let mut report = LoadReport::default();
    let mut grouped: IndexMap<String, Vec<Record>> = IndexMap::new();

    for (line, row) in reader.records().enumerate() {
        let row = row?;
        report.rows_read += 1;

        let record = match columns.parse(&row) {
            Ok(record) => record,
            Err(reason) => {
                // Header is line 1.
                debug!(line = line + 2, %reason, "Skipping dataset row");
                report.rows_skipped += 1;
                continue;
            }
        };

        grouped.entry(record.symbol.clone()).or_default().push(record);
    }

    let mut store = SeriesStore::new();
    for (symbol, mut records) in grouped {
        report.duplicates_dropped += sort_unique_by_date(&mut records);
        match store.add(Series::from_sorted(symbol, records)) {
            Ok(()) => {}
            Err(StoreError::DuplicateEntity { symbol, existing }) => {
                return Err(DataLoadError::ConflictingSymbols {
                    first: existing,
                    second: symbol,
                });
            }
            Err(other) => return Err(DataLoadError::Store(Box::new(other))),
        }
    }
    report.entities = store.len();

    if report.rows_skipped > 0 {
        warn!(skipped = report.rows_skipped, "Skipped incomplete dataset rows");
    }
    if report.duplicates_dropped > 0 {
        warn!(
            dropped = report.duplicates_dropped,
            "Dropped rows repeating an existing date"
        );
    }
    info!(
        rows = report.rows_read,
        entities = report.entities,
        "Loaded dataset"
    );

    Ok((store, report))
}

/// Opens `path` and reads it with [`load`].
pub fn load_path(path: impl AsRef<Path>) -> Result<(SeriesStore, LoadReport), DataLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load(file)
}
