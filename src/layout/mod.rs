//! Layout: natural widget sizes and the taffy-backed geometry managers.

pub mod engine;
pub mod measure;

use std::collections::HashMap;

use crate::geometry::{Region, Size};
use crate::toolkit::{WidgetId, WidgetKind, WidgetTree};

pub use engine::{LayoutEngine, LayoutError};
pub use measure::natural_size;

/// Lay out `window` on a surface of `size` and return every shown widget's
/// absolute region.
///
/// Scrollable widgets learn their visible size from the result, so wired
/// scrollbars see up-to-date fractions afterwards.
pub fn layout_window(
    tree: &mut WidgetTree,
    window: WidgetId,
    size: Size,
) -> Result<HashMap<WidgetId, Region>, LayoutError> {
    let mut engine = LayoutEngine::new();
    engine.sync_window(tree, window)?;
    engine.compute(size)?;
    let regions = engine.regions(tree);

    for (&id, region) in &regions {
        let Some(kind) = tree.kind(id) else { continue };
        let (x, y) = kind.scrollable();
        if !x && !y {
            continue;
        }
        let mut viewport = region.size();
        if kind == WidgetKind::Treeview
            && tree
                .get(id)
                .is_some_and(|data| data.options.show.unwrap_or_default().headings)
        {
            viewport.height = (viewport.height - 1).max(0);
        }
        tree.refresh_content(id);
        tree.set_viewport(id, viewport);
    }
    tracing::debug!(widgets = regions.len(), ?size, "laid out window");
    Ok(regions)
}
