//! JSON-lines event feed used by the `dashboard` and `watch` front ends.

use std::io::BufRead;

use tracing::{debug, info, warn};

use crate::{
    controller::{Event, EventHandler},
    errors::Error,
    render::RenderSurface,
};

/// What happened over the lifetime of one feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedSummary {
    /// Frames written to the surface, including the initial one.
    pub rendered: usize,
    /// Events that changed nothing.
    pub skipped: usize,
    /// Lines that could not be parsed or whose event failed.
    pub rejected: usize,
}

/// Reads one event per line until end of input.
///
/// The handler's current frame (if any) is rendered first. Bad lines and
/// failed events become notices on the surface; only I/O errors end the
/// feed early.
pub async fn run_event_feed<H, R, S>(
    handler: &mut H,
    input: R,
    surface: &mut S,
) -> Result<FeedSummary, Error>
where
    H: EventHandler + ?Sized,
    R: BufRead,
    S: RenderSurface + ?Sized,
{
    let mut summary = FeedSummary::default();
    if let Some(frame) = handler.current() {
        surface.render_frame(frame)?;
        summary.rendered += 1;
    }

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: Event = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "Ignoring malformed event");
                surface.notice(&format!("Invalid event: {err}"))?;
                summary.rejected += 1;
                continue;
            }
        };
        let name = event.name();

        match handler.handle(event).await {
            Ok(Some(frame)) => {
                surface.render_frame(&frame)?;
                summary.rendered += 1;
            }
            Ok(None) => {
                debug!(event = name, "No update");
                summary.skipped += 1;
            }
            Err(err) => {
                warn!(event = name, %err, "Event rejected");
                surface.notice(&err.to_string())?;
                summary.rejected += 1;
            }
        }
    }

    info!(
        rendered = summary.rendered,
        skipped = summary.skipped,
        rejected = summary.rejected,
        "Input closed"
    );
    Ok(summary)
}
