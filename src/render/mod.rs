//! Rendering: widget painters, the screen compositor and the terminal driver.

pub mod compositor;
pub mod driver;
pub mod paint;
pub mod strip;

pub use compositor::{CellUpdate, Compositor};
pub use driver::Driver;
pub use paint::{paint_widget, paint_window};
pub use strip::{CellStyle, Strip, StyledCell};
