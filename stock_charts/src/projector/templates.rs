//! Declarative presentation presets.
//!
//! A template never touches values; it only decides how a trace is drawn and
//! how the layout is labelled.

use crate::models::chart::{Axis, Layout, Legend, Marker, Title, Trace, TraceKind};

const PRICE_COLOR: &str = "#17b897";
const VOLUME_COLOR: &str = "#636efa";

#[derive(Clone, Debug, PartialEq)]
pub struct ChartTemplate {
    pub kind: TraceKind,
    pub mode: Option<String>,
    pub hovertemplate: Option<String>,
    pub marker_color: Option<String>,
    pub layout: Layout,
}

impl ChartTemplate {
    /// Unstyled lines under `title`.
    pub fn plain(title: impl Into<String>) -> Self {
        Self {
            kind: TraceKind::Scatter,
            mode: Some("lines".into()),
            hovertemplate: None,
            marker_color: None,
            layout: Layout {
                title: Title {
                    text: title.into(),
                    ..Title::default()
                },
                ..Layout::default()
            },
        }
    }

    /// The dashboard's closing price chart.
    pub fn price() -> Self {
        Self {
            hovertemplate: Some("$%{y:.2f}<extra></extra>".into()),
            layout: Layout {
                title: left_title("Closing Price of Stocks"),
                xaxis: fixed_axis(),
                yaxis: Axis {
                    tickprefix: Some("$".into()),
                    ..fixed_axis()
                },
                colorway: vec![PRICE_COLOR.into()],
                legend: None,
            },
            ..Self::plain("")
        }
    }

    /// The dashboard's volume bar chart.
    pub fn volume() -> Self {
        Self {
            kind: TraceKind::Bar,
            mode: None,
            hovertemplate: None,
            marker_color: Some(VOLUME_COLOR.into()),
            layout: Layout {
                title: left_title("Volume Traded"),
                xaxis: fixed_axis(),
                yaxis: fixed_axis(),
                colorway: vec![VOLUME_COLOR.into()],
                legend: None,
            },
        }
    }

    /// Overlaid closing prices of several symbols.
    pub fn comparison(title: impl Into<String>) -> Self {
        Self {
            layout: Layout {
                title: Title {
                    text: title.into(),
                    ..Title::default()
                },
                xaxis: labelled_axis("Date"),
                yaxis: labelled_axis("Closing Price"),
                colorway: Vec::new(),
                legend: Some(Legend {
                    traceorder: "normal".into(),
                }),
            },
            ..Self::plain("")
        }
    }

    pub(crate) fn style(&self, mut trace: Trace) -> Trace {
        trace.mode = self.mode.clone();
        trace.hovertemplate = self.hovertemplate.clone();
        trace.marker = self.marker_color.clone().map(|color| Marker { color });
        trace
    }
}

fn left_title(text: &str) -> Title {
    Title {
        text: text.into(),
        x: Some(0.05),
        xanchor: Some("left".into()),
    }
}

fn fixed_axis() -> Axis {
    Axis {
        fixedrange: Some(true),
        ..Axis::default()
    }
}

fn labelled_axis(text: &str) -> Axis {
    Axis {
        title: Some(Title {
            text: text.into(),
            ..Title::default()
        }),
        ..Axis::default()
    }
}
