//! Output surfaces for chart payloads.

pub mod json;
pub mod text;

use std::io;

use crate::{controller::Frame, models::chart::ChartPayload};

pub use json::JsonLinesSurface;
pub use text::TextSurface;

/// Receives finished charts keyed by chart id.
pub trait RenderSurface {
    fn render(&mut self, chart_id: &str, payload: &ChartPayload) -> io::Result<()>;

    /// Renders every chart of `frame` in order.
    fn render_frame(&mut self, frame: &Frame) -> io::Result<()> {
        for (chart_id, payload) in frame.iter() {
            self.render(chart_id, payload)?;
        }
        Ok(())
    }

    /// Reports a rejected event or similar condition to the user.
    fn notice(&mut self, message: &str) -> io::Result<()>;
}
