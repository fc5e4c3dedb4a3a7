//! WidgetTree: the arena every widget lives in.
//!
//! All widgets sit in one `SlotMap`; parent/child links are kept in
//! secondary maps. Windows are roots. The tree never deletes widgets: they
//! live as long as the tree (and so as long as their window).

use slotmap::{SecondaryMap, SlotMap};

use crate::geometry::Size;

use super::kind::WidgetKind;
use super::manager::{fits_grid, GridInfo, GridOptions, Manager, PackInfo, PackOptions, Sticky, MAX_GRID_CELLS};
use super::options::Orient;
use super::scroll::{Axis, ViewCommand};
use super::widget::{Tab, WidgetData, WidgetId};

const NO_CHILDREN: &[WidgetId] = &[];

/// Errors raised by toolkit operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolkitError {
    #[error("widget does not exist")]
    NoSuchWidget,
    #[error("a {0} is not a window")]
    NotAWindow(WidgetKind),
    #[error("a {0} is not a notebook")]
    NotANotebook(WidgetKind),
    #[error("notebook has no tab {0}")]
    NoSuchTab(usize),
    #[error("windows cannot be placed by a geometry manager")]
    CannotPlaceWindow,
    #[error("cannot use {requested} inside a master that already has slaves managed by {existing}")]
    ManagerConflict {
        requested: &'static str,
        existing: &'static str,
    },
    #[error("grid cell at row {row}, column {column} lies past the last of {max} grid cells", max = MAX_GRID_CELLS)]
    GridOutOfRange { row: u16, column: u16 },
    #[error("a {kind} has no {axis:?} view to scroll")]
    NotScrollable { kind: WidgetKind, axis: Axis },
    #[error("a {0} is not a scrollbar")]
    NotAScrollbar(WidgetKind),
    #[error("a {orient} scrollbar cannot drive the {axis:?} axis")]
    OrientMismatch { orient: Orient, axis: Axis },
    #[error("'{value}' is not a valid value for an integer variable")]
    InvalidValue { value: String },
}

/// The widget arena.
pub struct WidgetTree {
    widgets: SlotMap<WidgetId, WidgetData>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    parent: SecondaryMap<WidgetId, WidgetId>,
    windows: Vec<WidgetId>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            windows: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Creation and structure
    // -----------------------------------------------------------------------

    /// Create a new top-level window. The first one is the primary window.
    pub fn create_window(&mut self, title: Option<&str>) -> WidgetId {
        let mut data = WidgetData::new(WidgetKind::Window);
        data.title = title.map(str::to_owned);
        let id = self.widgets.insert(data);
        self.children.insert(id, Vec::new());
        self.windows.push(id);
        tracing::info!(window = self.windows.len(), ?title, "created window");
        id
    }

    /// Create a widget as the last child of `parent`.
    pub fn create(&mut self, parent: WidgetId, data: WidgetData) -> Result<WidgetId, ToolkitError> {
        if !self.widgets.contains_key(parent) {
            return Err(ToolkitError::NoSuchWidget);
        }
        let kind = data.kind;
        let id = self.widgets.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        self.refresh_content(id);
        tracing::debug!(%kind, ?id, ?parent, "created widget");
        Ok(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetData> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetData> {
        self.widgets.get_mut(id)
    }

    fn data(&self, id: WidgetId) -> Result<&WidgetData, ToolkitError> {
        self.widgets.get(id).ok_or(ToolkitError::NoSuchWidget)
    }

    fn data_mut(&mut self, id: WidgetId) -> Result<&mut WidgetData, ToolkitError> {
        self.widgets.get_mut(id).ok_or(ToolkitError::NoSuchWidget)
    }

    /// Kind of a widget, if it exists.
    pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.widgets.get(id).map(|w| w.kind)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parent.get(id).copied()
    }

    /// Children in creation order.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(NO_CHILDREN)
    }

    /// Windows in creation order.
    pub fn windows(&self) -> &[WidgetId] {
        &self.windows
    }

    /// The window a widget belongs to.
    pub fn window_of(&self, id: WidgetId) -> Option<WidgetId> {
        let mut current = id;
        loop {
            if self.kind(current)? == WidgetKind::Window {
                return Some(current);
            }
            current = self.parent(current)?;
        }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.widgets.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Set a window's title.
    pub fn set_title(&mut self, window: WidgetId, title: Option<&str>) -> Result<(), ToolkitError> {
        let data = self.data_mut(window)?;
        if data.kind != WidgetKind::Window {
            return Err(ToolkitError::NotAWindow(data.kind));
        }
        data.title = title.map(str::to_owned);
        Ok(())
    }

    /// Set a widget's requested width, in characters.
    pub fn configure_width(&mut self, id: WidgetId, width: u16) -> Result<(), ToolkitError> {
        self.data_mut(id)?.options.width = Some(width);
        Ok(())
    }

    /// Add `page` as a new tab of `notebook`. The first tab is selected.
    pub fn notebook_add(
        &mut self,
        notebook: WidgetId,
        page: WidgetId,
        text: &str,
    ) -> Result<(), ToolkitError> {
        if !self.contains(page) {
            return Err(ToolkitError::NoSuchWidget);
        }
        let data = self.data_mut(notebook)?;
        if data.kind != WidgetKind::Notebook {
            return Err(ToolkitError::NotANotebook(data.kind));
        }
        data.tabs.push(Tab {
            page,
            text: text.to_owned(),
        });
        if data.selected_tab.is_none() {
            data.selected_tab = Some(0);
        }
        Ok(())
    }

    /// Select the notebook tab at `index`.
    pub fn notebook_select(&mut self, notebook: WidgetId, index: usize) -> Result<(), ToolkitError> {
        let data = self.data_mut(notebook)?;
        if data.kind != WidgetKind::Notebook {
            return Err(ToolkitError::NotANotebook(data.kind));
        }
        if index >= data.tabs.len() {
            return Err(ToolkitError::NoSuchTab(index));
        }
        data.selected_tab = Some(index);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Geometry managers
    // -----------------------------------------------------------------------

    /// Place a widget in its master's grid.
    ///
    /// A missing row means the first row below every gridded sibling; a
    /// missing column means column 0.
    pub fn grid(&mut self, id: WidgetId, options: GridOptions) -> Result<GridInfo, ToolkitError> {
        self.check_placeable(id, "grid")?;
        let row = match options.row {
            Some(row) => row,
            None => self.first_free_row(id),
        };
        let info = GridInfo {
            row,
            column: options.column.unwrap_or(0),
            rowspan: options.rowspan.unwrap_or(1).max(1),
            columnspan: options.columnspan.unwrap_or(1).max(1),
            sticky: options.sticky.unwrap_or(Sticky::NONE),
            padx: options.padx.unwrap_or_default(),
            pady: options.pady.unwrap_or_default(),
        };
        if !fits_grid(info.row, info.rowspan) || !fits_grid(info.column, info.columnspan) {
            return Err(ToolkitError::GridOutOfRange {
                row: info.row,
                column: info.column,
            });
        }
        self.data_mut(id)?.manager = Some(Manager::Grid(info));
        tracing::debug!(?id, row = info.row, column = info.column, "gridded widget");
        Ok(info)
    }

    /// Pack a widget into its master.
    pub fn pack(&mut self, id: WidgetId, options: PackOptions) -> Result<PackInfo, ToolkitError> {
        self.check_placeable(id, "pack")?;
        let info = PackInfo {
            side: options.side.unwrap_or_default(),
            fill: options.fill.unwrap_or_default(),
            expand: options.expand.unwrap_or(false),
        };
        self.data_mut(id)?.manager = Some(Manager::Pack(info));
        tracing::debug!(?id, side = %info.side, "packed widget");
        Ok(info)
    }

    /// Children of `master` that a geometry manager has placed, in creation
    /// order.
    pub fn slaves(&self, master: WidgetId) -> Vec<WidgetId> {
        self.children(master)
            .iter()
            .copied()
            .filter(|&c| self.widgets.get(c).is_some_and(|w| w.manager.is_some()))
            .collect()
    }

    fn check_placeable(&self, id: WidgetId, requested: &'static str) -> Result<(), ToolkitError> {
        let data = self.data(id)?;
        if data.kind == WidgetKind::Window {
            return Err(ToolkitError::CannotPlaceWindow);
        }
        let Some(master) = self.parent(id) else {
            return Err(ToolkitError::NoSuchWidget);
        };
        let existing = self
            .slaves(master)
            .into_iter()
            .filter(|&s| s != id)
            .filter_map(|s| self.widgets[s].manager.map(|m| m.name()))
            .find(|&name| name != requested);
        match existing {
            Some(existing) => Err(ToolkitError::ManagerConflict {
                requested,
                existing,
            }),
            None => Ok(()),
        }
    }

    fn first_free_row(&self, id: WidgetId) -> u16 {
        let Some(master) = self.parent(id) else {
            return 0;
        };
        self.slaves(master)
            .into_iter()
            .filter(|&s| s != id)
            .filter_map(|s| match self.widgets[s].manager {
                Some(Manager::Grid(g)) => Some(g.row.saturating_add(g.rowspan)),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    /// Tell `target` to report view changes on `axis` to `scrollbar`.
    pub fn set_scroll_command(
        &mut self,
        target: WidgetId,
        axis: Axis,
        scrollbar: WidgetId,
    ) -> Result<(), ToolkitError> {
        self.check_scroll_pair(target, axis, scrollbar)?;
        let data = self.data_mut(target)?;
        match axis {
            Axis::X => data.xscroll_command = Some(scrollbar),
            Axis::Y => data.yscroll_command = Some(scrollbar),
        }
        self.report_view(target, axis);
        Ok(())
    }

    /// Make `scrollbar` drive `target`'s view on `axis`.
    pub fn set_scrollbar_command(
        &mut self,
        scrollbar: WidgetId,
        target: WidgetId,
        axis: Axis,
    ) -> Result<(), ToolkitError> {
        self.check_scroll_pair(target, axis, scrollbar)?;
        self.data_mut(scrollbar)?.command = Some((target, axis));
        Ok(())
    }

    fn check_scroll_pair(
        &self,
        target: WidgetId,
        axis: Axis,
        scrollbar: WidgetId,
    ) -> Result<(), ToolkitError> {
        let target_data = self.data(target)?;
        if !target_data.scrolls(axis) {
            return Err(ToolkitError::NotScrollable {
                kind: target_data.kind,
                axis,
            });
        }
        let bar = self.data(scrollbar)?;
        if bar.kind != WidgetKind::Scrollbar {
            return Err(ToolkitError::NotAScrollbar(bar.kind));
        }
        let orient = bar.options.orient.unwrap_or(Orient::Vertical);
        let expected = match axis {
            Axis::X => Orient::Horizontal,
            Axis::Y => Orient::Vertical,
        };
        if orient != expected {
            return Err(ToolkitError::OrientMismatch { orient, axis });
        }
        Ok(())
    }

    /// Move `target`'s view, then report the new span to its scrollbar.
    pub fn view(&mut self, target: WidgetId, axis: Axis, command: ViewCommand) -> Result<(), ToolkitError> {
        let data = self.data_mut(target)?;
        if !data.scrolls(axis) {
            return Err(ToolkitError::NotScrollable {
                kind: data.kind,
                axis,
            });
        }
        data.scroll.apply(axis, command);
        self.report_view(target, axis);
        Ok(())
    }

    /// Set the span a scrollbar shows.
    pub fn scrollbar_set(&mut self, scrollbar: WidgetId, first: f32, last: f32) -> Result<(), ToolkitError> {
        let data = self.data_mut(scrollbar)?;
        if data.kind != WidgetKind::Scrollbar {
            return Err(ToolkitError::NotAScrollbar(data.kind));
        }
        data.scrollbar.first = first.clamp(0.0, 1.0);
        data.scrollbar.last = last.clamp(0.0, 1.0);
        Ok(())
    }

    /// Act on a scrollbar as the user would: forwards the command to the
    /// view the scrollbar drives. A scrollbar with no command does nothing.
    pub fn scrollbar_move(&mut self, scrollbar: WidgetId, command: ViewCommand) -> Result<(), ToolkitError> {
        let data = self.data(scrollbar)?;
        if data.kind != WidgetKind::Scrollbar {
            return Err(ToolkitError::NotAScrollbar(data.kind));
        }
        match data.command {
            Some((target, axis)) => self.view(target, axis, command),
            None => Ok(()),
        }
    }

    /// Record the visible size of a widget's view (set by layout).
    pub fn set_viewport(&mut self, id: WidgetId, size: Size) {
        let Some(data) = self.widgets.get_mut(id) else {
            return;
        };
        if data.scroll.viewport_size == size {
            return;
        }
        data.scroll.set_viewport_size(size);
        self.report_view(id, Axis::X);
        self.report_view(id, Axis::Y);
    }

    /// Recompute the content size of a widget's view from its data.
    pub fn refresh_content(&mut self, id: WidgetId) {
        let Some(data) = self.widgets.get_mut(id) else {
            return;
        };
        let (x, y) = data.kind.scrollable();
        if !x && !y {
            return;
        }
        let size = content_size(data);
        data.scroll.set_content_size(size);
        self.report_view(id, Axis::X);
        self.report_view(id, Axis::Y);
    }

    fn report_view(&mut self, id: WidgetId, axis: Axis) {
        let Some(data) = self.widgets.get(id) else {
            return;
        };
        let Some(scrollbar) = data.scroll_command(axis) else {
            return;
        };
        let (first, last) = data.scroll.fractions(axis);
        if let Err(err) = self.scrollbar_set(scrollbar, first, last) {
            tracing::warn!(%err, "scroll command target rejected the update");
        }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Content extent of a scrollable widget, in cells.
fn content_size(data: &WidgetData) -> Size {
    let widest = |items: &[String]| items.iter().map(|v| v.chars().count()).max().unwrap_or(0) as i32;
    match data.kind {
        WidgetKind::Text => data
            .buffer
            .map(|b| {
                b.with(|buf| Size::new(buf.max_line_width() as i32, buf.line_count() as i32))
            })
            .unwrap_or_default(),
        WidgetKind::Listbox | WidgetKind::Treeview => Size::new(
            widest(&data.options.values),
            data.options.values.len() as i32,
        ),
        WidgetKind::Entry => Size::new(data.display_text().chars().count() as i32, 1),
        WidgetKind::Canvas => Size::new(
            i32::from(data.options.width.unwrap_or(0)),
            i32::from(data.options.height.unwrap_or(0)),
        ),
        _ => Size::ZERO,
    }
}
