use std::io::{self, Write};

use serde::Serialize;
use serde_json::json;

use crate::{models::chart::ChartPayload, render::RenderSurface};

#[derive(Serialize)]
struct ChartLine<'a> {
    chart_id: &'a str,
    figure: &'a ChartPayload,
}

/// Writes one JSON object per line: `{"chart_id", "figure"}` for charts and
/// `{"notice"}` for messages.
pub struct JsonLinesSurface<W> {
    out: W,
}

impl<W: Write> JsonLinesSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> RenderSurface for JsonLinesSurface<W> {
    fn render(&mut self, chart_id: &str, payload: &ChartPayload) -> io::Result<()> {
        self.write_line(&ChartLine {
            chart_id,
            figure: payload,
        })
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        self.write_line(&json!({ "notice": message }))
    }
}
