//! Plain-text rendering for terminals: one summary row per trace.

use std::io::{self, Write};

use crate::{
    models::chart::{ChartPayload, Trace},
    render::RenderSurface,
};

pub struct TextSurface<W> {
    out: W,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_trace(&mut self, trace: &Trace, prefix: &str) -> io::Result<()> {
        let (Some(first), Some(last)) = (trace.points().next(), trace.points().last()) else {
            return writeln!(self.out, "  {}: (no data)", trace.name);
        };
        let (low, high) = trace
            .y()
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        writeln!(
            self.out,
            "  {}: {} points, {} .. {}, first {prefix}{:.2}, last {prefix}{:.2}, low {prefix}{:.2}, high {prefix}{:.2}",
            trace.name,
            trace.len(),
            first.0,
            last.0,
            first.1,
            last.1,
            low,
            high,
        )
    }
}

impl<W: Write> RenderSurface for TextSurface<W> {
    fn render(&mut self, _chart_id: &str, payload: &ChartPayload) -> io::Result<()> {
        writeln!(self.out, "{}", payload.title())?;
        if payload.traces().is_empty() {
            writeln!(self.out, "  (no data)")?;
        }
        let prefix = payload.layout.yaxis.tickprefix.clone().unwrap_or_default();
        for trace in payload.traces() {
            self.write_trace(trace, &prefix)?;
        }
        self.out.flush()
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()
    }
}
