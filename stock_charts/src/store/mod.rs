//! In-memory collection of per-symbol [`Series`].
//!
//! The dataset dashboard builds one store at startup with [`loader::load`]
//! and only reads from it afterwards. The comparison front ends grow and
//! shrink a store through [`SeriesStore::add`] and [`SeriesStore::remove`].

pub mod loader;

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;

use crate::{
    errors::StoreError,
    models::{selection::DateWindow, series::Series},
};

pub use loader::{LoadReport, load, load_path};

/// Addresses one entity of a store for removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKey<'a> {
    /// 0-based position in insertion order.
    Index(usize),
    /// Exact identifier.
    Symbol(&'a str),
}

impl fmt::Display for EntityKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Index(i) => write!(f, "index {i}"),
            EntityKey::Symbol(s) => write!(f, "'{s}'"),
        }
    }
}

/// Insertion-ordered mapping from identifier to [`Series`].
///
/// No two keys are equal ignoring ASCII case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStore {
    series: IndexMap<String, Series>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All identifiers, sorted.
    pub fn entities(&self) -> BTreeSet<&str> {
        self.series.keys().map(String::as_str).collect()
    }

    /// Identifiers in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Earliest and latest date over every series. `None` when the store
    /// holds no records at all.
    pub fn bounds(&self) -> Option<DateWindow> {
        self.series
            .values()
            .filter_map(Series::bounds)
            .reduce(|acc, b| {
                DateWindow::new(acc.start().min(b.start()), acc.end().max(b.end())).unwrap_or(acc)
            })
    }

    pub fn get(&self, symbol: &str) -> Option<&Series> {
        self.series.get(symbol)
    }

    /// The stored key equal to `symbol` ignoring ASCII case, if any.
    pub fn find_ignore_case(&self, symbol: &str) -> Option<&str> {
        self.series
            .keys()
            .find(|key| key.eq_ignore_ascii_case(symbol))
            .map(String::as_str)
    }

    /// Appends `series` under its own symbol.
    pub fn add(&mut self, series: Series) -> Result<(), StoreError> {
        if let Some(existing) = self.find_ignore_case(series.symbol()) {
            return Err(StoreError::DuplicateEntity {
                symbol: series.symbol().to_string(),
                existing: existing.to_string(),
            });
        }
        self.series.insert(series.symbol().to_string(), series);
        Ok(())
    }

    /// Removes one entity, keeping the order of the rest.
    pub fn remove(&mut self, key: EntityKey<'_>) -> Result<Series, StoreError> {
        let removed = match key {
            EntityKey::Index(index) => self.series.shift_remove_index(index).map(|(_, s)| s),
            EntityKey::Symbol(symbol) => self.series.shift_remove(symbol),
        };
        removed.ok_or_else(|| StoreError::NotFound {
            target: key.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
