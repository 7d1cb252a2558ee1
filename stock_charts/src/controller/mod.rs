//! Selection state and the events that change it.
//!
//! Each controller owns its data and recomputes every chart it publishes
//! from scratch after a state change. A handler returning `Ok(None)` means
//! nothing was recomputed and the previous [`Frame`] still stands.

pub mod comparison;
pub mod dashboard;

use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{errors::Error, models::chart::ChartPayload};

pub use comparison::{COMPARISON_CHART, ComparisonController};
pub use dashboard::{DashboardController, PRICE_CHART, VOLUME_CHART};

/// A user action, as read from the JSON-lines input protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    SelectEntity {
        #[serde(default)]
        entity: Option<String>,
    },
    SetRange {
        #[serde(default)]
        start: Option<NaiveDate>,
        #[serde(default)]
        end: Option<NaiveDate>,
    },
    AddEntity {
        #[serde(default)]
        entity: Option<String>,
    },
    RemoveEntity {
        #[serde(default)]
        target: Option<EntityRef>,
    },
    Refresh,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectEntity { .. } => "select_entity",
            Event::SetRange { .. } => "set_range",
            Event::AddEntity { .. } => "add_entity",
            Event::RemoveEntity { .. } => "remove_entity",
            Event::Refresh => "refresh",
        }
    }
}

/// A tracked entity, by 1-based position or by exact identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Position(i64),
    Symbol(String),
}

/// The charts a controller publishes after one recomputation, keyed by
/// chart id in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    charts: IndexMap<String, ChartPayload>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chart(mut self, chart_id: &str, payload: ChartPayload) -> Self {
        self.charts.insert(chart_id.to_string(), payload);
        self
    }

    pub fn get(&self, chart_id: &str) -> Option<&ChartPayload> {
        self.charts.get(chart_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChartPayload)> {
        self.charts.iter().map(|(id, payload)| (id.as_str(), payload))
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// Common surface of the controllers, used by the event-feed front end.
#[async_trait]
pub trait EventHandler: Send {
    /// Applies one event. On error the controller's state is unchanged.
    async fn handle(&mut self, event: Event) -> Result<Option<Frame>, Error>;

    /// The last published frame, if any.
    fn current(&self) -> Option<&Frame>;
}

/// Treats a missing or blank identifier as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
