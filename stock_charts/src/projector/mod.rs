//! Turns filtered series into [`ChartPayload`]s.
//!
//! Projection is a pure function of its inputs: the same series, fields and
//! template always produce an identical payload.

pub mod templates;

pub use templates::ChartTemplate;

use crate::models::{
    chart::{ChartPayload, Trace},
    field::Field,
    series::Series,
};

/// One trace per field, in the order the fields are given.
pub fn project(series: &Series, fields: &[Field], title: &str) -> ChartPayload {
    project_with(series, fields, &ChartTemplate::plain(title))
}

/// Like [`project`], but styled by `template`.
///
/// A single-field projection names its trace after the symbol; otherwise
/// each trace is named after its field.
pub fn project_with(series: &Series, fields: &[Field], template: &ChartTemplate) -> ChartPayload {
    let traces = fields
        .iter()
        .map(|&field| {
            let name = if fields.len() == 1 {
                series.symbol().to_string()
            } else {
                field.to_string()
            };
            template.style(field_trace(series, field, name, template))
        })
        .collect();

    ChartPayload {
        traces,
        layout: template.layout.clone(),
    }
}

/// Overlays the closing price of each `(series, label)` on one time axis.
pub fn project_multiple(entries: &[(&Series, &str)], title: &str) -> ChartPayload {
    let template = ChartTemplate::comparison(title);
    let traces = entries
        .iter()
        .map(|&(series, label)| {
            template.style(field_trace(series, Field::Close, label.to_string(), &template))
        })
        .collect();

    ChartPayload {
        traces,
        layout: template.layout,
    }
}

fn field_trace(series: &Series, field: Field, name: String, template: &ChartTemplate) -> Trace {
    let points = series
        .records()
        .iter()
        .map(|record| (record.date, field.value(record)))
        .collect();
    Trace::new(name, template.kind, points)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::models::{chart::TraceKind, record::Record};

    fn googl() -> Series {
        let records = [100.0, 101.0, 99.0, 105.0, 110.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| Record {
                symbol: "GOOGL".into(),
                date: NaiveDate::from_ymd_opt(2017, 1, 2 + i as u32).unwrap(),
                open: Some(close - 1.0),
                high: Some(close + 1.0),
                low: Some(close - 2.0),
                close,
                volume: 1_000 * (i as u64 + 1),
            })
            .collect();
        Series::from_unsorted("GOOGL", records).unwrap().0
    }

    #[test]
    fn close_trace_matches_records_exactly() {
        let series = googl();
        let payload = project(&series, &[Field::Close], "GOOGL close");

        assert_eq!(payload.traces().len(), 1);
        let trace = &payload.traces()[0];
        assert_eq!(trace.len(), series.len());
        assert_eq!(trace.y(), &[100.0, 101.0, 99.0, 105.0, 110.0]);
        assert_eq!(trace.x()[0], NaiveDate::from_ymd_opt(2017, 1, 2).unwrap());
        assert_eq!(payload.title(), "GOOGL close");
    }

    #[test]
    fn one_trace_per_field_in_order() {
        let payload = project(&googl(), &[Field::Open, Field::Volume], "mixed");
        let names: Vec<&str> = payload.traces().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["open", "volume"]);
        assert_eq!(payload.traces()[1].y()[4], 5_000.0);
    }

    #[test]
    fn projection_is_idempotent() {
        let series = googl();
        let template = ChartTemplate::price();
        assert_eq!(
            project_with(&series, &[Field::Close], &template),
            project_with(&series, &[Field::Close], &template)
        );
    }

    #[test]
    fn price_template_carries_dashboard_styling() {
        let payload = project_with(&googl(), &[Field::Close], &ChartTemplate::price());
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["data"][0]["hovertemplate"], json!("$%{y:.2f}<extra></extra>"));
        assert_eq!(value["data"][0]["mode"], json!("lines"));
        assert_eq!(
            value["layout"]["title"],
            json!({"text": "Closing Price of Stocks", "x": 0.05, "xanchor": "left"})
        );
        assert_eq!(
            value["layout"]["yaxis"],
            json!({"tickprefix": "$", "fixedrange": true})
        );
        assert_eq!(value["layout"]["colorway"], json!(["#17b897"]));
    }

    #[test]
    fn volume_template_draws_bars() {
        let payload = project_with(&googl(), &[Field::Volume], &ChartTemplate::volume());
        let trace = &payload.traces()[0];
        assert_eq!(trace.kind, TraceKind::Bar);
        assert_eq!(trace.mode, None);
        assert_eq!(trace.marker.as_ref().unwrap().color, "#636efa");
        assert_eq!(payload.title(), "Volume Traded");
    }

    #[test]
    fn multiple_series_share_one_axis_in_order() {
        let a = googl();
        let b = Series::empty("MSFT");
        let payload = project_multiple(&[(&a, "GOOGL"), (&b, "MSFT")], "Stock Comparison");

        let names: Vec<&str> = payload.traces().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["GOOGL", "MSFT"]);
        assert!(payload.traces()[1].is_empty());

        let layout = serde_json::to_value(&payload.layout).unwrap();
        assert_eq!(layout["xaxis"]["title"]["text"], json!("Date"));
        assert_eq!(layout["yaxis"]["title"]["text"], json!("Closing Price"));
        assert_eq!(layout["legend"]["traceorder"], json!("normal"));
    }
}
