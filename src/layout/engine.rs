//! TaffyTree wrapper for window layout.
//!
//! [`LayoutEngine`] mirrors one window's placed widgets into a taffy tree,
//! runs layout, and reports results as absolute [`Region`]s.
//!
//! A master whose slaves are gridded becomes a CSS grid container with one
//! implicit auto-sized track per row and column; sticky edges map to
//! self-alignment and pads to margins. A packing master becomes a flex
//! container whose direction comes from its first slave's side.

use std::collections::HashMap;

use taffy::geometry::{Line, Rect, Size as TaffySize};
use taffy::prelude::{
    line, span, AlignContent, AlignSelf, AvailableSpace, Dimension, Display, FlexDirection, FromLength,
    JustifyContent, JustifySelf, LengthPercentage, LengthPercentageAuto, NodeId as TaffyNode,
    Style, TaffyTree,
};
use taffy::TaffyError;

use crate::geometry::{Offset, Region, Size, Spacing};
use crate::toolkit::{GridInfo, Manager, PackInfo, Side, WidgetId, WidgetKind, WidgetTree};

use super::measure::{chrome, is_container, natural_size};

/// Layout failure reported by taffy.
#[derive(Debug, thiserror::Error)]
#[error("layout failed: {0}")]
pub struct LayoutError(String);

impl From<TaffyError> for LayoutError {
    fn from(err: TaffyError) -> Self {
        LayoutError(err.to_string())
    }
}

/// Wraps a [`TaffyTree`] and maps widget ids to taffy nodes.
pub struct LayoutEngine {
    tree: TaffyTree<WidgetId>,
    node_map: HashMap<WidgetId, TaffyNode>,
    root: Option<(WidgetId, TaffyNode)>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            node_map: HashMap::new(),
            root: None,
        }
    }

    /// Rebuild the taffy tree from `window`'s subtree.
    ///
    /// Only widgets a geometry manager has placed take part, plus the
    /// selected page of each notebook. Everything else is not shown.
    pub fn sync_window(&mut self, widgets: &WidgetTree, window: WidgetId) -> Result<(), LayoutError> {
        self.clear();
        let root = self.sync_node(widgets, window, None)?;
        self.root = Some((window, root));
        Ok(())
    }

    fn sync_node(
        &mut self,
        widgets: &WidgetTree,
        id: WidgetId,
        manager: Option<Manager>,
    ) -> Result<TaffyNode, LayoutError> {
        let Some(data) = widgets.get(id) else {
            return Err(LayoutError("widget vanished during layout".to_owned()));
        };
        let shown = shown_children(widgets, id);
        let mut style = item_style(manager, data.kind)?;
        let natural = natural_size(data);

        if is_container(data.kind) {
            let border = chrome(data);
            style.border = rect_lp(border);
            if shown.is_empty() {
                style.size = TaffySize {
                    width: Dimension::from_length((natural.width + border.width()) as f32),
                    height: Dimension::from_length((natural.height + border.height()) as f32),
                };
            } else {
                container_style(&mut style, widgets, data.kind, &shown);
            }
            if data.kind == WidgetKind::Notebook {
                // Wide enough for the tab row.
                style.min_size.width = Dimension::from_length(natural.width as f32);
            }
        } else {
            style.min_size = TaffySize {
                width: Dimension::from_length(natural.width as f32),
                height: Dimension::from_length(natural.height as f32),
            };
        }

        let node = self.tree.new_leaf_with_context(style, id)?;
        self.node_map.insert(id, node);

        let mut children = Vec::with_capacity(shown.len());
        for &child in &shown {
            let child_manager = widgets.get(child).and_then(|c| c.manager);
            children.push(self.sync_node(widgets, child, child_manager)?);
        }
        self.tree.set_children(node, &children)?;
        Ok(node)
    }

    /// Run layout with the root filling `size`.
    pub fn compute(&mut self, size: Size) -> Result<(), LayoutError> {
        let Some((_, root)) = self.root else {
            return Ok(());
        };
        let mut style = self.tree.style(root)?.clone();
        style.size = TaffySize {
            width: Dimension::from_length(size.width as f32),
            height: Dimension::from_length(size.height as f32),
        };
        self.tree.set_style(root, style)?;
        self.tree.compute_layout(
            root,
            TaffySize {
                width: AvailableSpace::Definite(size.width as f32),
                height: AvailableSpace::Definite(size.height as f32),
            },
        )?;
        Ok(())
    }

    /// Layout of one widget relative to its parent.
    pub fn get_layout(&self, id: WidgetId) -> Option<Region> {
        let node = self.node_map.get(&id)?;
        let layout = self.tree.layout(*node).ok()?;
        Some(Region {
            x: layout.location.x.round() as i32,
            y: layout.location.y.round() as i32,
            width: layout.size.width.round() as i32,
            height: layout.size.height.round() as i32,
        })
    }

    /// Absolute regions of every laid-out widget.
    pub fn regions(&self, widgets: &WidgetTree) -> HashMap<WidgetId, Region> {
        let mut result = HashMap::new();
        if let Some((window, _)) = self.root {
            self.collect_regions(widgets, window, Offset::ZERO, &mut result);
        }
        result
    }

    fn collect_regions(
        &self,
        widgets: &WidgetTree,
        id: WidgetId,
        origin: Offset,
        out: &mut HashMap<WidgetId, Region>,
    ) {
        let Some(local) = self.get_layout(id) else {
            return;
        };
        let region = local.translate(origin);
        out.insert(id, region);
        for &child in widgets.children(id) {
            if self.node_map.contains_key(&child) {
                self.collect_regions(widgets, child, Offset::new(region.x, region.y), out);
            }
        }
    }

    fn clear(&mut self) {
        self.tree.clear();
        self.node_map.clear();
        self.root = None;
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Children that are drawn: placed slaves, or a notebook's selected page.
fn shown_children(widgets: &WidgetTree, id: WidgetId) -> Vec<WidgetId> {
    let Some(data) = widgets.get(id) else {
        return Vec::new();
    };
    if data.kind == WidgetKind::Notebook {
        return data
            .selected_tab
            .and_then(|i| data.tabs.get(i))
            .map(|tab| vec![tab.page])
            .unwrap_or_default();
    }
    widgets.slaves(id)
}

fn rect_lp(spacing: Spacing) -> Rect<LengthPercentage> {
    Rect {
        top: LengthPercentage::from_length(spacing.top as f32),
        right: LengthPercentage::from_length(spacing.right as f32),
        bottom: LengthPercentage::from_length(spacing.bottom as f32),
        left: LengthPercentage::from_length(spacing.left as f32),
    }
}

/// How a widget sits inside its master.
fn item_style(manager: Option<Manager>, kind: WidgetKind) -> Result<Style, LayoutError> {
    let mut style = Style::default();
    match manager {
        Some(Manager::Grid(info)) => grid_item(&mut style, info)?,
        Some(Manager::Pack(info)) => pack_item(&mut style, info),
        // A notebook page fills the notebook below the tab row.
        None if kind == WidgetKind::Page => {
            style.flex_grow = 1.0;
            style.align_self = Some(AlignSelf::Stretch);
        }
        None => {}
    }
    Ok(style)
}

/// Taffy line number of the line before grid cell `index`.
fn grid_line(index: u16) -> Result<i16, LayoutError> {
    i16::try_from(u32::from(index) + 1)
        .map_err(|_| LayoutError(format!("grid cell {index} is beyond the last grid line")))
}

fn grid_item(style: &mut Style, info: GridInfo) -> Result<(), LayoutError> {
    style.grid_row = Line {
        start: line(grid_line(info.row)?),
        end: span(info.rowspan),
    };
    style.grid_column = Line {
        start: line(grid_line(info.column)?),
        end: span(info.columnspan),
    };
    let sticky = info.sticky;
    style.justify_self = Some(match (sticky.w, sticky.e) {
        (true, true) => JustifySelf::Stretch,
        (true, false) => JustifySelf::Start,
        (false, true) => JustifySelf::End,
        (false, false) => JustifySelf::Center,
    });
    style.align_self = Some(match (sticky.n, sticky.s) {
        (true, true) => AlignSelf::Stretch,
        (true, false) => AlignSelf::Start,
        (false, true) => AlignSelf::End,
        (false, false) => AlignSelf::Center,
    });
    style.margin = Rect {
        left: LengthPercentageAuto::from_length(f32::from(info.padx.before)),
        right: LengthPercentageAuto::from_length(f32::from(info.padx.after)),
        top: LengthPercentageAuto::from_length(f32::from(info.pady.before)),
        bottom: LengthPercentageAuto::from_length(f32::from(info.pady.after)),
    };
    Ok(())
}

/// Flex item settings for a packed slave.
///
/// The master's flex direction comes from its first slave's side alone (see
/// `container_style`), so a slave's own `side` only matters when it is the
/// first. Mixed sides such as `left` plus `right` all flow in the first
/// slave's direction instead of filling from both edges as Tk does.
fn pack_item(style: &mut Style, info: PackInfo) {
    if info.expand {
        style.flex_grow = 1.0;
    }
    let cross_fill = if info.side.is_horizontal() {
        info.fill.fills_y()
    } else {
        info.fill.fills_x()
    };
    style.align_self = Some(if cross_fill {
        AlignSelf::Stretch
    } else {
        AlignSelf::Center
    });
    style.flex_shrink = 0.0;
}

fn container_style(style: &mut Style, widgets: &WidgetTree, kind: WidgetKind, shown: &[WidgetId]) {
    if kind == WidgetKind::Notebook {
        style.display = Display::Flex;
        style.flex_direction = FlexDirection::Column;
        return;
    }
    let first = shown.first().and_then(|&c| widgets.get(c)).and_then(|c| c.manager);
    match first {
        // Tk anchors the grid at the master's top-left corner.
        Some(Manager::Grid(_)) => {
            style.display = Display::Grid;
            style.justify_content = Some(JustifyContent::Start);
            style.align_content = Some(AlignContent::Start);
        }
        Some(Manager::Pack(info)) => {
            style.display = Display::Flex;
            style.flex_direction = match info.side {
                Side::Top => FlexDirection::Column,
                Side::Bottom => FlexDirection::ColumnReverse,
                Side::Left => FlexDirection::Row,
                Side::Right => FlexDirection::RowReverse,
            };
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::{Fill, GridOptions, Options, PackOptions, Relief, Sticky, WidgetData};

    fn label(tree: &mut WidgetTree, parent: WidgetId, text: &str) -> WidgetId {
        let options = Options { text: Some(text.into()), ..Options::default() };
        tree.create(parent, WidgetData::new(WidgetKind::Label).with_options(options))
            .unwrap()
    }

    fn layout(tree: &WidgetTree, window: WidgetId, size: Size) -> HashMap<WidgetId, Region> {
        let mut engine = LayoutEngine::new();
        engine.sync_window(tree, window).unwrap();
        engine.compute(size).unwrap();
        engine.regions(tree)
    }

    #[test]
    fn window_fills_the_screen() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let regions = layout(&tree, window, Size::new(40, 10));
        assert_eq!(regions[&window], Region::new(0, 0, 40, 10));
    }

    #[test]
    fn unplaced_widgets_are_not_laid_out() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let a = label(&mut tree, window, "a");
        let regions = layout(&tree, window, Size::new(40, 10));
        assert!(!regions.contains_key(&a));
    }

    #[test]
    fn grid_cells_follow_rows_and_columns() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let a = label(&mut tree, window, "aaaa");
        let b = label(&mut tree, window, "bb");
        let c = label(&mut tree, window, "cccccc");
        let at = |row, column| GridOptions {
            row: Some(row),
            column: Some(column),
            sticky: Some(Sticky { w: true, ..Sticky::NONE }),
            ..GridOptions::default()
        };
        tree.grid(a, at(0, 0)).unwrap();
        tree.grid(b, at(0, 1)).unwrap();
        tree.grid(c, at(1, 0)).unwrap();
        let regions = layout(&tree, window, Size::new(40, 10));
        assert_eq!(regions[&a], Region::new(0, 0, 4, 1));
        // Column 0 is as wide as its widest cell.
        assert_eq!(regions[&b], Region::new(6, 0, 2, 1));
        assert_eq!(regions[&c], Region::new(0, 1, 6, 1));
    }

    #[test]
    fn sticky_ew_stretches_across_the_column() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let wide = label(&mut tree, window, "wide label");
        let short = label(&mut tree, window, "x");
        tree.grid(wide, GridOptions::default()).unwrap();
        tree.grid(short, GridOptions { sticky: Some("ew".parse().unwrap()), ..GridOptions::default() })
            .unwrap();
        let regions = layout(&tree, window, Size::new(40, 10));
        assert_eq!(regions[&short].width, 10);
    }

    #[test]
    fn grid_pads_become_margins() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let a = label(&mut tree, window, "a");
        tree.grid(a, GridOptions { padx: Some("2".parse().unwrap()), pady: Some("1".parse().unwrap()), ..GridOptions::default() })
            .unwrap();
        let regions = layout(&tree, window, Size::new(40, 10));
        assert_eq!((regions[&a].x, regions[&a].y), (2, 1));
    }

    #[test]
    fn pack_left_runs_left_to_right() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let a = label(&mut tree, window, "one");
        let b = label(&mut tree, window, "two");
        for id in [a, b] {
            tree.pack(id, PackOptions { side: Some(Side::Left), ..PackOptions::default() })
                .unwrap();
        }
        let regions = layout(&tree, window, Size::new(40, 10));
        assert_eq!(regions[&a].x, 0);
        assert_eq!(regions[&b].x, 3);
        assert_eq!(regions[&a].y, regions[&b].y);
    }

    #[test]
    fn pack_top_stacks_and_fill_x_stretches() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let a = label(&mut tree, window, "abcd");
        let b = label(&mut tree, window, "filled");
        tree.pack(a, PackOptions::default()).unwrap();
        tree.pack(b, PackOptions { fill: Some(Fill::X), ..PackOptions::default() }).unwrap();
        let regions = layout(&tree, window, Size::new(40, 10));
        assert_eq!(regions[&a].y, 0);
        assert_eq!(regions[&b].y, 1);
        assert_eq!(regions[&b].width, 40);
        // Unfilled slaves are centered across the master.
        assert_eq!(regions[&a].x, 18);
    }

    #[test]
    fn grid_lines_beyond_i16_are_errors() {
        let info = |row| GridInfo {
            row,
            column: 0,
            rowspan: 1,
            columnspan: 1,
            sticky: Sticky::NONE,
            padx: Default::default(),
            pady: Default::default(),
        };
        let mut style = Style::default();
        assert!(grid_item(&mut style, info(i16::MAX as u16 - 1)).is_ok());
        assert!(grid_item(&mut style, info(i16::MAX as u16)).is_err());
        assert!(grid_item(&mut style, info(40_000)).is_err());
    }

    #[test]
    fn pack_mixed_sides_follow_the_first_slave() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let a = label(&mut tree, window, "aa");
        let b = label(&mut tree, window, "bb");
        tree.pack(a, PackOptions { side: Some(Side::Left), ..PackOptions::default() }).unwrap();
        tree.pack(b, PackOptions { side: Some(Side::Right), ..PackOptions::default() }).unwrap();
        let regions = layout(&tree, window, Size::new(20, 3));
        assert_eq!((regions[&a].x, regions[&b].x), (0, 2));
    }

    #[test]
    fn nested_regions_are_absolute() {
        let mut tree = WidgetTree::new();
        let window = tree.create_window(None);
        let options = Options { relief: Relief::Solid, ..Options::default() };
        let frame = tree
            .create(window, WidgetData::new(WidgetKind::Frame).with_options(options))
            .unwrap();
        let inner = label(&mut tree, frame, "in");
        tree.grid(frame, GridOptions { padx: Some("3".parse().unwrap()), ..GridOptions::default() })
            .unwrap();
        tree.grid(inner, GridOptions::default()).unwrap();
        let regions = layout(&tree, window, Size::new(40, 10));
        assert_eq!(regions[&frame], Region::new(3, 0, 4, 3));
        assert_eq!(regions[&inner], Region::new(4, 1, 2, 1));
    }
}
