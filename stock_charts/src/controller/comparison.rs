//! Multi-symbol comparison: a growing and shrinking list of tracked
//! series, each fetched from a [`DataProvider`] when added.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    controller::{EntityRef, Event, EventHandler, Frame, non_blank},
    errors::{Error, StoreError},
    filter::filter_series,
    models::{chart::ChartPayload, request::SeriesRequest, selection::DateWindow, series::Series},
    projector::project_multiple,
    providers::{DataProvider, ProviderError},
    store::{EntityKey, SeriesStore},
};

pub const COMPARISON_CHART: &str = "stock-graph";

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Overlays every tracked series, restricted to `window`, in tracking order.
pub fn render(tracked: &SeriesStore, window: DateWindow, title: &str) -> ChartPayload {
    let visible: Vec<Series> = tracked.iter().map(|s| filter_series(s, window)).collect();
    let entries: Vec<(&Series, &str)> = visible.iter().map(|s| (s, s.symbol())).collect();
    project_multiple(&entries, title)
}

pub struct ComparisonController<P> {
    provider: P,
    tracked: SeriesStore,
    window: DateWindow,
    title: String,
    fetch_timeout: Duration,
    frame: Option<Frame>,
}

impl<P: DataProvider> ComparisonController<P> {
    pub fn new(provider: P, window: DateWindow, title: impl Into<String>) -> Self {
        Self {
            provider,
            tracked: SeriesStore::new(),
            window,
            title: title.into(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            frame: None,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn tracked(&self) -> &SeriesStore {
        &self.tracked
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Fetches `entity` and starts tracking it.
    ///
    /// The duplicate check runs before the fetch. Any fetch problem (error,
    /// empty result, timeout) leaves the tracked list untouched.
    pub async fn add_entity(&mut self, entity: Option<&str>) -> Result<Option<Frame>, Error> {
        let Some(symbol) = non_blank(entity) else {
            return Ok(None);
        };
        if let Some(existing) = self.tracked.find_ignore_case(symbol) {
            return Err(StoreError::DuplicateEntity {
                symbol: symbol.to_string(),
                existing: existing.to_string(),
            }
            .into());
        }

        let series = self.fetch(symbol).await?;
        info!(symbol, records = series.len(), "Tracking symbol");
        self.tracked.add(series)?;
        Ok(Some(self.recompute()))
    }

    async fn fetch(&self, symbol: &str) -> Result<Series, Error> {
        let request = SeriesRequest::new(symbol, self.window);
        let fetched = tokio::time::timeout(self.fetch_timeout, self.provider.fetch_series(request))
            .await
            .map_err(|_| Error::FetchTimeout {
                symbol: symbol.to_string(),
                timeout: self.fetch_timeout,
            })?;

        match fetched {
            Ok(series) if series.is_empty() => Err(Error::FetchFailure {
                symbol: symbol.to_string(),
                source: ProviderError::Empty {
                    symbol: symbol.to_string(),
                },
            }),
            Ok(series) if series.symbol() != symbol => Err(Error::FetchFailure {
                symbol: symbol.to_string(),
                source: ProviderError::Internal(format!(
                    "Provider answered with {}",
                    series.symbol()
                )),
            }),
            Ok(series) => Ok(series),
            Err(source) => Err(Error::FetchFailure {
                symbol: symbol.to_string(),
                source,
            }),
        }
    }

    /// Stops tracking one entity. Positions are 1-based.
    pub fn remove_entity(&mut self, target: Option<&EntityRef>) -> Result<Option<Frame>, Error> {
        let removed = match target {
            None => return Ok(None),
            Some(EntityRef::Symbol(symbol)) => {
                let Some(symbol) = non_blank(Some(symbol.as_str())) else {
                    return Ok(None);
                };
                self.tracked.remove(EntityKey::Symbol(symbol))?
            }
            Some(EntityRef::Position(position)) => {
                let not_found = || StoreError::NotFound {
                    target: format!("position {position}"),
                };
                let index = position
                    .checked_sub(1)
                    .and_then(|i| usize::try_from(i).ok())
                    .ok_or_else(not_found)?;
                self.tracked
                    .remove(EntityKey::Index(index))
                    .map_err(|_| not_found())?
            }
        };
        info!(symbol = removed.symbol(), "Stopped tracking symbol");
        Ok(Some(self.recompute()))
    }

    /// Changes the display window. Later additions are fetched over it too.
    pub fn set_range(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Frame>, Error> {
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(None);
        };
        let window = DateWindow::new(start, end)?;
        if window == self.window && self.frame.is_some() {
            return Ok(None);
        }
        self.window = window;
        Ok(Some(self.recompute()))
    }

    /// The tracked series under another title, or `None` when nothing is
    /// tracked.
    pub fn snapshot(&self, title: &str) -> Option<ChartPayload> {
        (!self.tracked.is_empty()).then(|| render(&self.tracked, self.window, title))
    }

    pub async fn dispatch(&mut self, event: &Event) -> Result<Option<Frame>, Error> {
        match event {
            Event::AddEntity { entity } => self.add_entity(entity.as_deref()).await,
            Event::RemoveEntity { target } => self.remove_entity(target.as_ref()),
            Event::SetRange { start, end } => self.set_range(*start, *end),
            Event::Refresh => Ok(Some(self.recompute())),
            Event::SelectEntity { .. } => {
                warn!(event = event.name(), "Event not supported by the comparison view");
                Ok(None)
            }
        }
    }

    fn recompute(&mut self) -> Frame {
        let frame = Frame::new().with_chart(
            COMPARISON_CHART,
            render(&self.tracked, self.window, &self.title),
        );
        self.frame = Some(frame.clone());
        frame
    }
}

#[async_trait]
impl<P: DataProvider> EventHandler for ComparisonController<P> {
    async fn handle(&mut self, event: Event) -> Result<Option<Frame>, Error> {
        self.dispatch(&event).await
    }

    fn current(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }
}
