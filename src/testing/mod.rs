//! Headless testing helpers.
//!
//! [`render_window_to_string`] paints one window as plain text; [`Pilot`]
//! drives a whole [`Preview`](crate::app::Preview) with simulated keys.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::render_window_to_string;
