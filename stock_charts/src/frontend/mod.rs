//! Front-end loops driving a controller from an input stream.

pub mod feed;
pub mod session;

pub use feed::{FeedSummary, run_event_feed};
pub use session::run_prompt_session;
