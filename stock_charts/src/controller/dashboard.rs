//! The dataset-backed dashboard: one entity, one date window, two charts.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
    controller::{Event, EventHandler, Frame, non_blank},
    errors::{Error, FilterError},
    filter::filter_window,
    models::{field::Field, selection::{DateWindow, Selection}},
    projector::{ChartTemplate, project_with},
    store::SeriesStore,
};

pub const PRICE_CHART: &str = "price-chart";
pub const VOLUME_CHART: &str = "volume-chart";

/// Computes the transition for `event` without touching any state.
///
/// Returns `Ok(None)` when the event leaves the selection as it is, either
/// because a required field is missing or because nothing would change.
/// `refresh` always recomputes while a selection exists.
pub fn reduce(
    store: &SeriesStore,
    prior: Option<&Selection>,
    event: &Event,
) -> Result<Option<(Selection, Frame)>, Error> {
    let next = match event {
        Event::SelectEntity { entity } => {
            let Some(entity) = non_blank(entity.as_deref()) else {
                return Ok(None);
            };
            let Some(window) = prior.map(|s| s.window).or_else(|| store.bounds()) else {
                return Ok(None);
            };
            Selection {
                entity: entity.to_string(),
                window,
            }
        }
        Event::SetRange { start, end } => {
            let (Some(start), Some(end)) = (*start, *end) else {
                return Ok(None);
            };
            let Some(prior) = prior else {
                return Ok(None);
            };
            Selection {
                entity: prior.entity.clone(),
                window: clamp_window(store, start, end)?,
            }
        }
        Event::Refresh => match prior {
            Some(prior) => {
                let frame = render(store, prior);
                return Ok(Some((prior.clone(), frame)));
            }
            None => return Ok(None),
        },
        Event::AddEntity { .. } | Event::RemoveEntity { .. } => {
            warn!(event = event.name(), "Event not supported by the dataset dashboard");
            return Ok(None);
        }
    };

    if prior == Some(&next) {
        debug!(event = event.name(), "Selection unchanged");
        return Ok(None);
    }
    let frame = render(store, &next);
    Ok(Some((next, frame)))
}

/// Validates `[start, end]` and narrows it into the store's bounds.
///
/// A window that misses the data entirely is rejected so the prior selection
/// stays on screen. An empty store has no bounds to clamp against.
fn clamp_window(store: &SeriesStore, start: NaiveDate, end: NaiveDate) -> Result<DateWindow, FilterError> {
    let requested = DateWindow::new(start, end)?;
    let Some(bounds) = store.bounds() else {
        return Ok(requested);
    };
    requested.clamp_to(bounds).ok_or(FilterError::OutOfBounds {
        start,
        end,
        first: bounds.start(),
        last: bounds.end(),
    })
}

/// Builds both dashboard charts for `selection`.
pub fn render(store: &SeriesStore, selection: &Selection) -> Frame {
    let series = filter_window(store, &selection.entity, selection.window);
    Frame::new()
        .with_chart(
            PRICE_CHART,
            project_with(&series, &[Field::Close], &ChartTemplate::price()),
        )
        .with_chart(
            VOLUME_CHART,
            project_with(&series, &[Field::Volume], &ChartTemplate::volume()),
        )
}

/// Owns the loaded store and the current [`Selection`].
#[derive(Debug)]
pub struct DashboardController {
    store: SeriesStore,
    selection: Option<Selection>,
    frame: Option<Frame>,
}

impl DashboardController {
    /// Starts on `default_symbol` over the full span of the data.
    ///
    /// An absent or unknown default falls back to the first entity in
    /// sorted order. An empty store starts with no selection.
    pub fn new(store: SeriesStore, default_symbol: Option<&str>) -> Self {
        let entity = default_symbol
            .filter(|symbol| store.get(symbol).is_some())
            .map(str::to_string)
            .or_else(|| store.entities().first().map(|s| s.to_string()));

        let selection = match (entity, store.bounds()) {
            (Some(entity), Some(window)) => Some(Selection { entity, window }),
            _ => None,
        };
        let frame = selection.as_ref().map(|s| render(&store, s));
        if let Some(selection) = &selection {
            info!(
                entity = %selection.entity,
                start = %selection.window.start(),
                end = %selection.window.end(),
                "Dashboard ready"
            );
        }

        Self {
            store,
            selection,
            frame,
        }
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_entity(&mut self, entity: Option<&str>) -> Result<Option<Frame>, Error> {
        self.dispatch(&Event::SelectEntity {
            entity: entity.map(str::to_string),
        })
    }

    pub fn set_range(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Frame>, Error> {
        self.dispatch(&Event::SetRange { start, end })
    }

    pub fn refresh(&mut self) -> Result<Option<Frame>, Error> {
        self.dispatch(&Event::Refresh)
    }

    /// Runs [`reduce`] and commits its result.
    pub fn dispatch(&mut self, event: &Event) -> Result<Option<Frame>, Error> {
        let Some((selection, frame)) = reduce(&self.store, self.selection.as_ref(), event)? else {
            return Ok(None);
        };
        debug!(entity = %selection.entity, "Recomputed dashboard");
        self.selection = Some(selection);
        self.frame = Some(frame.clone());
        Ok(Some(frame))
    }
}

#[async_trait]
impl EventHandler for DashboardController {
    async fn handle(&mut self, event: Event) -> Result<Option<Frame>, Error> {
        self.dispatch(&event)
    }

    fn current(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }
}
