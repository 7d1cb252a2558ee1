//! Chart descriptions handed to render surfaces.
//!
//! The serialized shape follows the plotly figure schema
//! (`{"data": [...], "layout": {...}}`) so a JSON surface can pass it
//! straight to a browser. Only the attributes the dashboards use are modelled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a trace is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
}

/// One named run of `(date, value)` points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TraceKind,
    x: Vec<NaiveDate>,
    y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl Trace {
    pub fn new(name: impl Into<String>, kind: TraceKind, points: Vec<(NaiveDate, f64)>) -> Self {
        let (x, y) = points.into_iter().unzip();
        Self {
            name: name.into(),
            kind,
            x,
            y,
            mode: None,
            hovertemplate: None,
            marker: None,
        }
    }

    pub fn x(&self) -> &[NaiveDate] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickprefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixedrange: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub traceorder: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    #[serde(default)]
    pub xaxis: Axis,
    #[serde(default)]
    pub yaxis: Axis,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colorway: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

/// A complete, self-describing chart: traces plus layout metadata.
///
/// Payloads are rebuilt from scratch on every selection change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "data")]
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl ChartPayload {
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// True when no trace carries a single point.
    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(Trace::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_as_plotly_figure() {
        let date = NaiveDate::from_ymd_opt(2016, 5, 2).unwrap();
        let mut trace = Trace::new("AAPL", TraceKind::Scatter, vec![(date, 93.64)]);
        trace.mode = Some("lines".into());

        let payload = ChartPayload {
            traces: vec![trace],
            layout: Layout {
                title: Title {
                    text: "Prices".into(),
                    ..Title::default()
                },
                ..Layout::default()
            },
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "data": [{
                    "name": "AAPL",
                    "type": "scatter",
                    "x": ["2016-05-02"],
                    "y": [93.64],
                    "mode": "lines"
                }],
                "layout": {
                    "title": {"text": "Prices"},
                    "xaxis": {},
                    "yaxis": {}
                }
            })
        );
    }
}
