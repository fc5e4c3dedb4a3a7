//! Plain-text rendering for snapshot tests.

use crate::geometry::Size;
use crate::layout::{layout_window, LayoutError};
use crate::render::{paint_window, Compositor};
use crate::toolkit::{WidgetId, WidgetTree};

/// Lay out `window` at `width` x `height` and return what it paints, one
/// line per row with trailing blanks trimmed.
///
/// ```ignore
/// let text = render_window_to_string(&mut tree, window, 20, 3)?;
/// assert!(text.starts_with("[ OK ]"));
/// ```
pub fn render_window_to_string(
    tree: &mut WidgetTree,
    window: WidgetId,
    width: i32,
    height: i32,
) -> Result<String, LayoutError> {
    let size = Size::new(width, height);
    let regions = layout_window(tree, window, size)?;
    let mut screen = Compositor::new(size);
    paint_window(tree, window, &regions, &mut screen);
    Ok(screen.to_text())
}
